#![no_main]

use libfuzzer_sys::fuzz_target;

use energydash_core::dataset::Dataset;
use energydash_core::handlers::{calculate_anova, update_graph};

fuzz_target!(|data: &[u8]| {
    // Should not panic, whatever the bytes
    let Ok(dataset) = Dataset::from_csv_bytes(data) else {
        return;
    };
    for size in dataset.input_sizes() {
        let _ = update_graph(&dataset, size);
        let _ = calculate_anova(&dataset, size);
    }
    let _ = dataset.page(usize::MAX, 10);
});
