#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    for commit in changelens_git::parse_log(&text) {
        let _ = std::hint::black_box(commit.short_sha());
    }
});
