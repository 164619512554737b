#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    for change in changelens_git::parse_name_status(&text) {
        let _ = std::hint::black_box(change.moved_from());
    }
});
