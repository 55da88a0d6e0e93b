use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lgs_core::sheet::AnswerSheet;
use lgs_core::subject::{AnswerKind, FieldId, Subject};
use lgs_core::validator::{parse_count, InputValidator, SubjectQuota};

fn broken_sheet() -> AnswerSheet {
    let mut sheet = AnswerSheet::new();
    for subject in Subject::ALL {
        sheet.set(subject.field(AnswerKind::Correct), "25");
        sheet.set(subject.field(AnswerKind::Incorrect), "-4");
    }
    sheet
}

fn bench_validate_all(c: &mut Criterion) {
    let validator = InputValidator::new();

    c.bench_function("validate_all_valid", |b| {
        let mut sheet = AnswerSheet::new();
        b.iter(|| validator.validate_all(black_box(&mut sheet), None))
    });

    c.bench_function("validate_all_broken", |b| {
        b.iter_batched(
            broken_sheet,
            |mut sheet| validator.validate_all(black_box(&mut sheet), None),
            criterion::BatchSize::SmallInput,
        )
    });

    c.bench_function("on_input", |b| {
        let focus = FieldId::parse("matematik_dogru").unwrap();
        b.iter_batched(
            broken_sheet,
            |mut sheet| validator.on_input(black_box(&mut sheet), &focus.form_key()),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_quota(c: &mut Criterion) {
    c.bench_function("settle_quota", |b| {
        b.iter(|| {
            let mut quota = SubjectQuota::new(Subject::Fen, 20, black_box(30), black_box(-3));
            quota.settle(None)
        })
    });

    c.bench_function("parse_count", |b| {
        b.iter(|| parse_count(black_box("  17abc")))
    });
}

criterion_group!(benches, bench_validate_all, bench_quota);
criterion_main!(benches);
