//! Word-window chunking for semantic search.
//!
//! Splits long text into overlapping word windows so a query can match a
//! local region of a document instead of competing with its full length.

/// Words per chunk.
pub const CHUNK_SIZE_WORDS: usize = 300;
/// Overlapping words between consecutive chunks.
pub const CHUNK_OVERLAP_WORDS: usize = 50;

/// Splits text into overlapping word-window chunks.
///
/// Texts at or under one window come back as a single chunk. Empty or
/// whitespace-only input produces no chunks.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= chunk_size {
        return vec![words.join(" ")];
    }

    let step = chunk_size.saturating_sub(overlap).max(1);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < words.len() {
        let end = (start + chunk_size).min(words.len());
        chunks.push(words[start..end].join(" "));
        if end == words.len() {
            break;
        }
        start += step;
    }

    chunks
}

/// Chunks with the default window and overlap.
pub fn chunk_text_default(text: &str) -> Vec<String> {
    chunk_text(text, CHUNK_SIZE_WORDS, CHUNK_OVERLAP_WORDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_empty_text_produces_no_chunks() {
        assert!(chunk_text("", 300, 50).is_empty());
        assert!(chunk_text("   \n\t  ", 300, 50).is_empty());
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let text = words(100);
        let chunks = chunk_text(&text, 300, 50);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], text);
    }

    #[test]
    fn test_long_text_chunks_overlap() {
        let text = words(700);
        let chunks = chunk_text(&text, 300, 50);
        assert!(chunks.len() > 1);

        // Last 50 words of chunk 0 must reappear at the start of chunk 1
        let tail: Vec<&str> = chunks[0].split_whitespace().rev().take(50).collect();
        let head: Vec<&str> = chunks[1].split_whitespace().take(50).collect();
        let mut tail_fwd = tail.clone();
        tail_fwd.reverse();
        assert_eq!(tail_fwd, head);
    }

    #[test]
    fn test_all_words_covered() {
        let text = words(700);
        let chunks = chunk_text(&text, 300, 50);
        let last_chunk = chunks.last().unwrap();
        assert!(last_chunk.ends_with("w699"));
    }

    #[test]
    fn test_no_empty_chunks() {
        let text = words(1000);
        for chunk in chunk_text(&text, 300, 50) {
            assert!(!chunk.trim().is_empty());
        }
    }

    #[test]
    fn test_degenerate_overlap_still_terminates() {
        // overlap >= chunk_size would loop forever without the step floor
        let text = words(20);
        let chunks = chunk_text(&text, 5, 5);
        assert!(!chunks.is_empty());
        assert!(chunks.len() <= 20);
    }
}
