#![no_main]

use libfuzzer_sys::fuzz_target;
use wpt_export_git::{CommitPosition, strip_position_label};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let stripped = strip_position_label(input);
        assert!(input.ends_with(stripped));

        if let Ok(position) = CommitPosition::parse(input) {
            let reparsed = CommitPosition::parse(&position.to_string())
                .expect("display output must parse");
            assert_eq!(position, reparsed);
        }
    }
});
