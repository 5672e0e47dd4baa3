//! Fan-out normalization must give the same result as sequential processing

use super::*;
use crate::config::Config;
use crate::models::RawLine;
use crate::processor::FileProcessor;

fn mixed_lines(count: usize) -> Vec<RawLine> {
    (0..count)
        .map(|i| {
            let text = match i % 4 {
                0 => CANONICAL.replacen("350", &i.to_string(), 1),
                1 => SPLIT_NAME.replacen("350", &i.to_string(), 1),
                2 => UNRECOVERABLE.to_string(),
                _ => MISSING_SECONDS.replacen("350", &i.to_string(), 1),
            };
            RawLine::new(i + 2, text)
        })
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_matches_sequential() {
    let lines = mixed_lines(1000);

    let sequential = FileProcessor::new(Config::default().with_workers(1))
        .unwrap()
        .normalize_lines(lines.clone())
        .await
        .unwrap();

    let parallel = FileProcessor::new(Config::default().with_workers(4).with_chunk_size(37))
        .unwrap()
        .normalize_lines(lines)
        .await
        .unwrap();

    assert_eq!(sequential.len(), 1000);
    assert_eq!(parallel, sequential);
}

#[tokio::test]
async fn test_parallel_preserves_line_order() {
    let lines = mixed_lines(250);

    let outcomes = FileProcessor::new(Config::default().with_workers(3).with_chunk_size(10))
        .unwrap()
        .normalize_lines(lines)
        .await
        .unwrap();

    let line_numbers: Vec<usize> = outcomes.iter().map(|o| o.line_number()).collect();
    let expected: Vec<usize> = (2..252).collect();
    assert_eq!(line_numbers, expected);
    let accepted = outcomes.iter().filter(|o| o.is_accepted()).count();
    assert_eq!(accepted, 250 - 62);
}
