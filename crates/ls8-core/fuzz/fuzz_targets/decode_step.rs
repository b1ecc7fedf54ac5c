#![no_main]

use libfuzzer_sys::fuzz_target;
use ls8_core::{Decoder, Machine, StepOutcome, MEMORY_SIZE};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let _ = Decoder::decode(data[0]);

    let image = &data[..data.len().min(MEMORY_SIZE)];
    let mut machine = Machine::new();
    if machine.load_program(image).is_err() {
        return;
    }

    let mut out = Vec::new();
    for _ in 0..MEMORY_SIZE {
        match machine.step(&mut out) {
            Ok(StepOutcome::Halted) | Err(_) => break,
            Ok(StepOutcome::Retired) => {}
        }
    }
});
