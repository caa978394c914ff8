//! Output formats, the set requested per run, and the per-format failure policy.

use core::fmt;

/// Encoded output formats written next to each rendered icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Png,
    WebP,
    Avif,
}

impl OutputFormat {
    /// Every output format, in emission order.
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Png, OutputFormat::WebP, OutputFormat::Avif];

    /// File extension (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::WebP => "webp",
            OutputFormat::Avif => "avif",
        }
    }

    /// MIME type string.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::WebP => "image/webp",
            OutputFormat::Avif => "image/avif",
        }
    }

    /// Whether an encoder for this format is compiled in.
    pub fn is_available(self) -> bool {
        match self {
            OutputFormat::Png => true,
            OutputFormat::WebP => cfg!(feature = "webp"),
            OutputFormat::Avif => cfg!(feature = "avif"),
        }
    }

    fn bit(self) -> u8 {
        match self {
            OutputFormat::Png => 1 << 0,
            OutputFormat::WebP => 1 << 1,
            OutputFormat::Avif => 1 << 2,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Set of requested output formats. PNG is always present.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FormatSet(u8);

impl FormatSet {
    /// PNG only.
    pub fn png_only() -> Self {
        FormatSet(OutputFormat::Png.bit())
    }

    /// PNG plus the optional formats switched on.
    pub fn new(webp: bool, avif: bool) -> Self {
        Self::png_only()
            .with(OutputFormat::WebP, webp)
            .with(OutputFormat::Avif, avif)
    }

    /// Enable or disable a format. PNG cannot be disabled.
    pub fn with(mut self, format: OutputFormat, enabled: bool) -> Self {
        if enabled {
            self.0 |= format.bit();
        } else if format != OutputFormat::Png {
            self.0 &= !format.bit();
        }
        self
    }

    pub fn contains(self, format: OutputFormat) -> bool {
        (self.0 & format.bit()) != 0
    }

    /// Requested formats in emission order.
    pub fn iter(self) -> impl Iterator<Item = OutputFormat> {
        OutputFormat::ALL.into_iter().filter(move |&f| self.contains(f))
    }
}

impl Default for FormatSet {
    fn default() -> Self {
        Self::png_only()
    }
}

impl fmt::Debug for FormatSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// What a failed encode of one output file means for the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Policy {
    /// Failure aborts the whole generation.
    Required,
    /// Failure is logged, recorded as skipped, and generation continues.
    BestEffort,
}

/// Per-format failure policy, consulted uniformly by the emitter.
///
/// | Format | Default      |
/// |--------|--------------|
/// | PNG    | `Required`   |
/// | WebP   | `Required`   |
/// | AVIF   | `BestEffort` |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatPolicy {
    webp: Policy,
    avif: Policy,
}

impl FormatPolicy {
    /// Policy for a format. PNG is always required.
    pub fn policy(&self, format: OutputFormat) -> Policy {
        match format {
            OutputFormat::Png => Policy::Required,
            OutputFormat::WebP => self.webp,
            OutputFormat::Avif => self.avif,
        }
    }

    /// Override the policy of an auxiliary format. PNG stays required.
    pub fn with(mut self, format: OutputFormat, policy: Policy) -> Self {
        match format {
            OutputFormat::Png => {}
            OutputFormat::WebP => self.webp = policy,
            OutputFormat::Avif => self.avif = policy,
        }
        self
    }
}

impl Default for FormatPolicy {
    fn default() -> Self {
        Self {
            webp: Policy::Required,
            avif: Policy::BestEffort,
        }
    }
}
