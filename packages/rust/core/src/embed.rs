//! Embedded word-list data for the game client.
//!
//! Builds a Bloom filter over the full list and packs every solution word
//! into 25 bits, then renders both as a C source file together with the
//! lookup helpers declared in the client's `wordlist.h`.

use std::fmt::Write as _;
use std::path::PathBuf;

use fivelist_shared::{EmbedSettings, FivelistError, ListPaths, Result, WORD_LENGTH};
use tracing::{info, instrument, warn};

use crate::bloom::{self, BloomFilter, FNV_OFFSET, FNV_PRIME, SEED_STEP};
use crate::lists;

/// Bloom table bytes per output row.
const BLOOM_ROW: usize = 16;

/// Packed solutions per output row.
const SOLUTION_ROW: usize = 8;

/// Configuration for [`generate_embedded_data`].
#[derive(Debug, Clone)]
pub struct EmbedConfig {
    /// Input word lists.
    pub lists: ListPaths,
    /// Destination C source file.
    pub output_path: PathBuf,
    /// Bloom filter size in bits.
    pub bloom_bits: u32,
    /// Hash functions per word.
    pub bloom_k: u32,
}

impl EmbedConfig {
    pub fn new(lists: ListPaths, settings: &EmbedSettings) -> Self {
        Self {
            lists,
            output_path: PathBuf::from(&settings.output),
            bloom_bits: settings.bloom_bits,
            bloom_k: settings.bloom_k,
        }
    }
}

/// Summary of a generated data file.
#[derive(Debug, Clone)]
pub struct EmbedResult {
    pub output_path: PathBuf,
    /// Full-list words hashed into the filter.
    pub all_count: usize,
    /// Solution words packed into the table.
    pub solution_count: usize,
    pub bits_set: u32,
    pub bloom_bits: u32,
    pub bloom_bytes: usize,
    pub solution_bytes: usize,
}

impl EmbedResult {
    /// Percentage of filter bits set.
    pub fn fill_percent(&self) -> f64 {
        100.0 * f64::from(self.bits_set) / f64::from(self.bloom_bits)
    }

    /// Total bytes the client holds in memory.
    pub fn total_bytes(&self) -> usize {
        self.bloom_bytes + self.solution_bytes
    }
}

/// Read both lists, build the tables, and write the C source.
#[instrument(skip_all, fields(output = %config.output_path.display()))]
pub fn generate_embedded_data(config: &EmbedConfig) -> Result<EmbedResult> {
    let mut bloom = BloomFilter::new(config.bloom_bits, config.bloom_k)?;

    let all_words = lists::read_exact_length_lines(&config.lists.all, WORD_LENGTH)?;
    for word in &all_words {
        bloom.insert(word);
    }
    info!(words = all_words.len(), "processed words for bloom filter");

    let mut solutions = Vec::new();
    for line in lists::read_exact_length_lines(&config.lists.solution, WORD_LENGTH)? {
        match bloom::encode_word(&line) {
            Ok(packed) => solutions.push(packed),
            Err(e) => warn!(word = %line, error = %e, "skipping solution entry"),
        }
    }
    info!(words = solutions.len(), "processed solution words");

    if solutions.is_empty() {
        return Err(FivelistError::validation(format!(
            "{} contains no usable solution words",
            config.lists.solution.display()
        )));
    }

    let source = render_c_source(&bloom, &solutions, all_words.len())
        .map_err(|e| FivelistError::parse(format!("failed to render C source: {e}")))?;
    lists::write_atomic(&config.output_path, &source)?;

    let result = EmbedResult {
        output_path: config.output_path.clone(),
        all_count: all_words.len(),
        solution_count: solutions.len(),
        bits_set: bloom.bits_set(),
        bloom_bits: bloom.size_bits(),
        bloom_bytes: bloom.size_bytes(),
        solution_bytes: solutions.len() * std::mem::size_of::<u32>(),
    };

    info!(
        bits_set = result.bits_set,
        total_bytes = result.total_bytes(),
        "generated embedded word list data"
    );
    Ok(result)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render_c_source(
    bloom: &BloomFilter,
    solutions: &[u32],
    all_count: usize,
) -> std::result::Result<String, std::fmt::Error> {
    let mut out = String::new();
    let bytes = bloom.size_bytes();
    let sol_count = solutions.len();

    writeln!(out, "// Auto-generated wordlist data - do not edit")?;
    writeln!(
        out,
        "// Generated from ALL.TXT ({all_count} words) and SOLUTION.TXT ({sol_count} words)\n"
    )?;
    writeln!(out, "#include \"wordlist.h\"")?;
    writeln!(out, "#include <string.h>")?;
    writeln!(out, "#include <ctype.h>\n")?;

    write_header_guard(&mut out, bloom)?;

    writeln!(out, "// Bloom filter data ({bytes} bytes)")?;
    write!(out, "static const uint8_t bloom_data[BLOOM_SIZE_BYTES] = {{\n    ")?;
    write_table(&mut out, bloom.as_bytes(), BLOOM_ROW, |out, b| {
        write!(out, "0x{b:02X}")
    })?;
    writeln!(out, "\n}};\n")?;

    writeln!(out, "// BSS bloom filter (copied from data on init)")?;
    writeln!(out, "uint8_t bloom_filter[BLOOM_SIZE_BYTES];\n")?;

    writeln!(out, "// Solution words encoded as 25-bit integers")?;
    writeln!(out, "const int solution_count = {sol_count};")?;
    write!(out, "const uint32_t solutions[{sol_count}] = {{\n    ")?;
    write_table(&mut out, solutions, SOLUTION_ROW, |out, w| {
        write!(out, "0x{w:07X}")
    })?;
    writeln!(out, "\n}};\n")?;

    write_helpers(&mut out)?;
    Ok(out)
}

/// Refuse to compile against a `wordlist.h` sized for a different table.
///
/// Declarations below use the header's macros, so this guard is the only
/// place the generated sizes appear as literals.
fn write_header_guard(out: &mut String, bloom: &BloomFilter) -> std::fmt::Result {
    let bits = bloom.size_bits();
    let k = bloom.k();
    writeln!(out, "#if BLOOM_SIZE_BITS != {bits} || BLOOM_K != {k}")?;
    writeln!(
        out,
        "#error \"wordlist.h bloom parameters do not match this data (BLOOM_SIZE_BITS={bits}, BLOOM_K={k})\""
    )?;
    writeln!(out, "#endif\n")
}

/// Comma-separated values, a fresh indented row every `per_row` items.
fn write_table<T: Copy>(
    out: &mut String,
    items: &[T],
    per_row: usize,
    mut item: impl FnMut(&mut String, T) -> std::fmt::Result,
) -> std::fmt::Result {
    for (i, &value) in items.iter().enumerate() {
        item(out, value)?;
        if i + 1 < items.len() {
            out.push(',');
            if (i + 1) % per_row == 0 {
                out.push_str("\n    ");
            }
        }
    }
    Ok(())
}

fn write_helpers(out: &mut String) -> std::fmt::Result {
    writeln!(out, "// FNV-1a hash function")?;
    writeln!(out, "static uint32_t fnv1a(const char *word, uint32_t seed) {{")?;
    writeln!(out, "    uint32_t hash = {FNV_OFFSET}u ^ seed;")?;
    writeln!(out, "    for (int i = 0; i < {WORD_LENGTH}; i++) {{")?;
    writeln!(out, "        hash ^= (uint8_t)tolower(word[i]);")?;
    writeln!(out, "        hash *= {FNV_PRIME}u;")?;
    writeln!(out, "    }}")?;
    writeln!(out, "    return hash;")?;
    writeln!(out, "}}\n")?;

    writeln!(out, "void bloom_init(void) {{")?;
    writeln!(out, "    memcpy(bloom_filter, bloom_data, BLOOM_SIZE_BYTES);")?;
    writeln!(out, "}}\n")?;

    writeln!(out, "int bloom_check(const char *word) {{")?;
    writeln!(out, "    for (uint32_t i = 0; i < BLOOM_K; i++) {{")?;
    writeln!(out, "        uint32_t hash = fnv1a(word, i * 0x{SEED_STEP:X}u);")?;
    writeln!(out, "        uint32_t bit = hash % BLOOM_SIZE_BITS;")?;
    writeln!(out, "        if (!(bloom_filter[bit / 8] & (1 << (bit % 8)))) {{")?;
    writeln!(out, "            return 0;")?;
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")?;
    writeln!(out, "    return 1;")?;
    writeln!(out, "}}\n")?;

    writeln!(out, "uint32_t encode_word(const char *word) {{")?;
    writeln!(out, "    uint32_t result = 0;")?;
    writeln!(out, "    for (int i = 0; i < {WORD_LENGTH}; i++) {{")?;
    writeln!(out, "        result = (result << 5) | (tolower(word[i]) - 'a');")?;
    writeln!(out, "    }}")?;
    writeln!(out, "    return result;")?;
    writeln!(out, "}}\n")?;

    writeln!(out, "void decode_word(uint32_t encoded, char *out) {{")?;
    writeln!(out, "    for (int i = {}; i >= 0; i--) {{", WORD_LENGTH - 1)?;
    writeln!(out, "        out[i] = 'a' + (encoded & 0x1F);")?;
    writeln!(out, "        encoded >>= 5;")?;
    writeln!(out, "    }}")?;
    writeln!(out, "    out[{WORD_LENGTH}] = '\\0';")?;
    writeln!(out, "}}\n")?;

    writeln!(out, "void get_solution(int index, char *out) {{")?;
    writeln!(out, "    if (index >= 0 && index < solution_count) {{")?;
    writeln!(out, "        decode_word(solutions[index], out);")?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("fivelist-embed-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn make_config(dir: &Path, all: &str, solution: &str) -> EmbedConfig {
        let paths = ListPaths {
            all: dir.join("ALL.TXT"),
            solution: dir.join("SOLUTION.TXT"),
        };
        std::fs::write(&paths.all, all).unwrap();
        std::fs::write(&paths.solution, solution).unwrap();
        EmbedConfig {
            lists: paths,
            output_path: dir.join("wordlist_data.c"),
            bloom_bits: 1024,
            bloom_k: 7,
        }
    }

    #[test]
    fn generates_c_source_with_tables() {
        let dir = temp_dir();
        let config = make_config(
            &dir,
            "APPLE\r\nBERRY\nCRAFT\nTOOLONG\n",
            "AAAAA\nCRAFT\n",
        );

        let result = generate_embedded_data(&config).unwrap();
        assert_eq!(result.all_count, 3);
        assert_eq!(result.solution_count, 2);
        assert_eq!(result.bloom_bytes, 128);
        assert_eq!(result.solution_bytes, 8);
        assert_eq!(result.total_bytes(), 136);
        assert!(result.bits_set > 0 && result.bits_set <= 21);

        let source = std::fs::read_to_string(&config.output_path).unwrap();
        assert!(source.starts_with("// Auto-generated wordlist data - do not edit\n"));
        assert!(source.contains("ALL.TXT (3 words) and SOLUTION.TXT (2 words)"));
        assert!(source.contains("static const uint8_t bloom_data[BLOOM_SIZE_BYTES] = {"));
        assert!(source.contains("const int solution_count = 2;"));
        let craft = encode_word_hex("CRAFT");
        assert!(source.contains(&format!("const uint32_t solutions[2] = {{\n    0x0000000,{craft}\n}};")));
        assert!(source.contains("uint32_t bit = hash % BLOOM_SIZE_BITS;"));
        assert!(source.contains("for (uint32_t i = 0; i < BLOOM_K; i++)"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn bloom_rows_hold_sixteen_bytes() {
        let dir = temp_dir();
        let config = make_config(&dir, "APPLE\n", "APPLE\n");
        generate_embedded_data(&config).unwrap();

        let source = std::fs::read_to_string(&config.output_path).unwrap();
        let start = source.find("bloom_data[BLOOM_SIZE_BYTES] = {\n").unwrap();
        let first_row = source[start..].lines().nth(1).unwrap();
        assert_eq!(first_row.matches("0x").count(), 16);
        // 128 bytes / 16 per row
        let table_end = source[start..].find("};").unwrap();
        assert_eq!(source[start..start + table_end].lines().count(), 1 + 8);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn embedded_filter_matches_library_filter() {
        let dir = temp_dir();
        let config = make_config(&dir, "APPLE\nBERRY\n", "BERRY\n");
        generate_embedded_data(&config).unwrap();

        let mut bloom = BloomFilter::new(1024, 7).unwrap();
        bloom.insert("APPLE");
        bloom.insert("BERRY");
        let expected: Vec<String> = bloom.as_bytes()[..16].iter().map(|b| format!("0x{b:02X}")).collect();

        let source = std::fs::read_to_string(&config.output_path).unwrap();
        assert!(source.contains(&expected.join(",")));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn declarations_follow_header_macros() {
        let dir = temp_dir();
        let config = make_config(&dir, "APPLE\n", "APPLE\n");
        generate_embedded_data(&config).unwrap();

        let source = std::fs::read_to_string(&config.output_path).unwrap();
        let guard = source.find("#if BLOOM_SIZE_BITS != 1024 || BLOOM_K != 7\n#error").unwrap();
        assert!(guard > source.find("#include \"wordlist.h\"").unwrap());
        assert!(guard < source.find("bloom_data[").unwrap());

        assert!(source.contains("uint8_t bloom_filter[BLOOM_SIZE_BYTES];"));
        assert!(source.contains("memcpy(bloom_filter, bloom_data, BLOOM_SIZE_BYTES);"));
        // Configured sizes only appear in the guard and the comment.
        assert!(!source.contains("[128]"));
        assert!(!source.contains("1024u"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn skips_non_letter_solutions() {
        let dir = temp_dir();
        let config = make_config(&dir, "APPLE\n", "APPLE\nAB1DE\n");
        let result = generate_embedded_data(&config).unwrap();
        assert_eq!(result.solution_count, 1);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn empty_solution_list_is_rejected() {
        let dir = temp_dir();
        let config = make_config(&dir, "APPLE\n", "\n");
        let err = generate_embedded_data(&config).unwrap_err();
        assert!(matches!(err, FivelistError::Validation { .. }));
        assert!(!config.output_path.exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_list_is_fatal() {
        let dir = temp_dir();
        let config = EmbedConfig {
            lists: ListPaths {
                all: dir.join("ALL.TXT"),
                solution: dir.join("SOLUTION.TXT"),
            },
            output_path: dir.join("wordlist_data.c"),
            bloom_bits: 1024,
            bloom_k: 7,
        };
        assert!(matches!(
            generate_embedded_data(&config),
            Err(FivelistError::Io { .. })
        ));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    fn encode_word_hex(word: &str) -> String {
        format!("0x{:07X}", bloom::encode_word(word).unwrap())
    }
}
