#![no_main]

use ferrous_autowire::parse_signature;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let source = String::from_utf8_lossy(data);
    let names = parse_signature(&source);

    for name in &names {
        assert!(!name.is_empty());
        assert_eq!(name.trim(), name);
        assert!(!name.contains(','));
    }

    // Only the first group is read.
    if !source.contains('(') {
        assert!(names.is_empty());
    }
});
