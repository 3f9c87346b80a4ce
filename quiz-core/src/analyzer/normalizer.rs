use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Configuration options for text normalization.
#[derive(Clone, Copy, Debug)]
pub struct NormalizerConfig {
    /// When enabled, decomposes accented characters and drops the combining
    /// marks. For example, "Canción" becomes "cancion".
    pub strip_diacritics: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            strip_diacritics: true,
        }
    }
}

/// Canonicalizes free text for answer comparison.
///
/// Applies, in order:
/// - Unicode lowercasing
/// - NFD decomposition with combining marks removed (optional)
/// - Removal of every character that is neither a word character
///   (alphanumeric or `_`) nor whitespace
/// - Collapsing whitespace runs into a single space
/// - Trimming leading and trailing space
///
/// The order matters: punctuation is dropped without leaving a gap, so
/// `"auto-móvil"` becomes `"automovil"`, while `"sol , luna"` becomes
/// `"sol luna"`.
///
/// # Examples
///
/// ```
/// use quiz_core::analyzer::TextNormalizer;
///
/// let normalizer = TextNormalizer::default();
/// assert_eq!(normalizer.normalize("  ¡Hola,   MUNDO!  "), "hola mundo");
/// assert_eq!(normalizer.normalize("Canción"), "cancion");
/// ```
#[derive(Clone, Debug, Default)]
pub struct TextNormalizer {
    config: NormalizerConfig,
}

impl TextNormalizer {
    /// Creates a new normalizer with the specified configuration.
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Normalizes text into an existing String buffer.
    ///
    /// Clears the buffer before writing and reuses its capacity.
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        out.clear();
        out.reserve(input.len());

        let mut writer = Collapser::new(out);

        if input.is_ascii() {
            for b in input.bytes() {
                writer.push(b.to_ascii_lowercase() as char);
            }
        } else if self.config.strip_diacritics {
            input
                .chars()
                .flat_map(char::to_lowercase)
                .nfd()
                .filter(|c| !is_combining_mark(*c))
                .for_each(|c| writer.push(c));
        } else {
            input
                .chars()
                .flat_map(char::to_lowercase)
                .for_each(|c| writer.push(c));
        }
    }

    /// Normalizes text and returns a new String.
    #[inline]
    pub fn normalize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.normalize_into(input, &mut out);
        out
    }
}

#[inline(always)]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Writes word characters, turning whitespace runs into one separator and
/// never emitting a leading or trailing space.
struct Collapser<'a> {
    out: &'a mut String,
    pending_space: bool,
}

impl<'a> Collapser<'a> {
    fn new(out: &'a mut String) -> Self {
        Self {
            out,
            pending_space: false,
        }
    }

    #[inline(always)]
    fn push(&mut self, c: char) {
        if c.is_whitespace() {
            self.pending_space = !self.out.is_empty();
        } else if is_word_char(c) {
            if self.pending_space {
                self.out.push(' ');
                self.pending_space = false;
            }
            self.out.push(c);
        }
    }
}
