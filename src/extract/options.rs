//! Extraction options and configuration.

use crate::classify::DEFAULT_MIN_CONFIDENCE;

/// Pages eligible for outline extraction by default.
pub const DEFAULT_MAX_PAGES: usize = 50;

/// Options for extracting a document outline.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Pages past this count are never read
    pub max_pages: usize,

    /// Spans scoring below this are never classified
    pub min_confidence: f64,

    /// Error handling mode for page extraction
    pub error_mode: ErrorMode,

    /// How font statistics are gathered
    pub statistics: StatisticsMode,

    /// Whether batch extraction runs documents in parallel
    pub parallel: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page cap.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Set the confidence gate.
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip unreadable pages).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the statistics mode.
    pub fn with_statistics_mode(mut self, mode: StatisticsMode) -> Self {
        self.statistics = mode;
        self
    }

    /// Gather font statistics over the whole document before classifying.
    pub fn two_pass(mut self) -> Self {
        self.statistics = StatisticsMode::TwoPass;
        self
    }

    /// Enable or disable parallel batch processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            error_mode: ErrorMode::Strict,
            statistics: StatisticsMode::Streaming,
            parallel: true,
        }
    }
}

/// Error handling mode during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on the first unreadable page
    #[default]
    Strict,
    /// Skip unreadable pages and continue
    Lenient,
}

/// How the font statistics behind the scores are gathered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatisticsMode {
    /// Record each span as it is scored; a span sees only itself and the
    /// spans before it, so results depend on span order
    #[default]
    Streaming,
    /// Record every candidate span first, then score against the frozen
    /// document-wide statistics
    TwoPass,
}
