#![no_main]

use libfuzzer_sys::fuzz_target;
use log_analyzer::parser::parse_line;
use log_analyzer::stats::Stats;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Rejections are fine; panics and nondeterminism are not.
        let first = parse_line(input);
        assert_eq!(first, parse_line(input));

        if let Ok(entry) = first {
            let mut stats = Stats::new();
            stats.ingest(&entry);
            assert_eq!(stats.report().latency.max, entry.latency_ms);
        }
    }
});
