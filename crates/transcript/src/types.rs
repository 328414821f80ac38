/// One item in the assembled word stream: a spoken word or a standalone
/// punctuation mark.
///
/// Both variants share timing, confidence, and attribution fields; only
/// words carry a sentence-boundary flag and tags. Consumers that need the
/// distinction match exhaustively; consumers that don't use the shared
/// accessors.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssembledWord {
    Word {
        /// Sub-word fragments concatenated, single leading space stripped.
        text: String,
        start_s: f64,
        duration_s: f64,
        /// Minimum confidence across the constituent sub-word tokens.
        confidence: f64,
        /// True when the next stream item is sentence-terminating
        /// punctuation (`.`, `?`, `!`).
        eos: bool,
        speaker: Option<String>,
        language: Option<String>,
        /// Always empty in this revision; reserved for future annotation.
        tags: Vec<String>,
    },
    Punct {
        text: String,
        start_s: f64,
        duration_s: f64,
        confidence: f64,
        speaker: Option<String>,
        language: Option<String>,
    },
}

impl AssembledWord {
    pub fn text(&self) -> &str {
        match self {
            Self::Word { text, .. } | Self::Punct { text, .. } => text,
        }
    }

    pub fn start_s(&self) -> f64 {
        match self {
            Self::Word { start_s, .. } | Self::Punct { start_s, .. } => *start_s,
        }
    }

    pub fn duration_s(&self) -> f64 {
        match self {
            Self::Word { duration_s, .. } | Self::Punct { duration_s, .. } => *duration_s,
        }
    }

    pub fn end_s(&self) -> f64 {
        self.start_s() + self.duration_s()
    }

    pub fn confidence(&self) -> f64 {
        match self {
            Self::Word { confidence, .. } | Self::Punct { confidence, .. } => *confidence,
        }
    }

    pub fn speaker(&self) -> Option<&str> {
        match self {
            Self::Word { speaker, .. } | Self::Punct { speaker, .. } => speaker.as_deref(),
        }
    }

    pub fn language(&self) -> Option<&str> {
        match self {
            Self::Word { language, .. } | Self::Punct { language, .. } => language.as_deref(),
        }
    }

    /// Sentence-boundary flag; punctuation never carries it.
    pub fn eos(&self) -> bool {
        match self {
            Self::Word { eos, .. } => *eos,
            Self::Punct { .. } => false,
        }
    }

    pub fn is_punct(&self) -> bool {
        matches!(self, Self::Punct { .. })
    }
}

/// A unique speaker in the transcript.
///
/// The upstream service labels speakers with opaque strings (`"1"`, `"2"`,
/// …). Assembly maps each label to a display name and a UUID exactly once;
/// every downstream reference resolves through this table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SpeakerInfo {
    pub source_label: String,
    /// `"Speaker N"`, numbered in order of first appearance.
    pub display_name: String,
    /// Version-4 UUID, stable within a single transcript.
    pub uuid: String,
}

/// The complete intermediate representation of an assembled transcript.
///
/// Built in one pass by [`crate::Assembler`] and consumed read-only by all
/// emitters. `words` are ordered by `start_s`, non-decreasing; every
/// non-`None` speaker label on a word has a matching [`SpeakerInfo`] entry.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transcript {
    pub words: Vec<AssembledWord>,
    /// Keyed by `source_label`, in order of first appearance.
    pub speakers: Vec<SpeakerInfo>,
    /// ISO 639-1 code of the dominant language; empty when language
    /// identification was off.
    pub primary_language: String,
    pub source_name: String,
    /// End of the final word; 0 for an empty word stream.
    pub duration_s: f64,
}

impl Transcript {
    pub fn speaker(&self, source_label: &str) -> Option<&SpeakerInfo> {
        self.speakers
            .iter()
            .find(|s| s.source_label == source_label)
    }

    /// Resolve an optional word label to a table entry, falling back to the
    /// first (default) speaker.
    pub fn speaker_or_default(&self, source_label: Option<&str>) -> Option<&SpeakerInfo> {
        source_label
            .and_then(|label| self.speaker(label))
            .or_else(|| self.speakers.first())
    }
}
