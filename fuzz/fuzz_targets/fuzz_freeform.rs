#![no_main]

use libfuzzer_sys::fuzz_target;

use energydash_core::handlers::calculate_generalized_anova;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Split into at most three fields on newlines
    let fields: Vec<Option<&str>> = text.splitn(3, '\n').map(Some).collect();
    let update = calculate_generalized_anova(1, &fields);
    assert!(!update.conclusion.is_empty());
});
