//! Built-in demo dataset.

use crate::models::{Gender, MonthKey, VisitRecord, VisitSource};

#[allow(clippy::too_many_arguments)]
fn visit(
    id: &str,
    disease: &str,
    patient: &str,
    gender: Gender,
    age: u32,
    family: &str,
    month: &str,
    recurrence: u32,
    source: VisitSource,
) -> VisitRecord {
    VisitRecord {
        id: id.into(),
        disease: disease.into(),
        patient: patient.into(),
        gender,
        age,
        family: family.into(),
        month: MonthKey::from_trusted(month),
        recurrence,
        source,
    }
}

/// The twelve demo visits, February to June 2024.
#[rustfmt::skip]
pub fn seed_records() -> Vec<VisitRecord> {
    use Gender::*;
    use VisitSource::*;

    vec![
        visit("d-01", "Fever", "Ranil Wickramasinghe", Male, 70, "Wickramasinghe", "2024-05", 2, Clinic),
        visit("d-02", "Headache", "Chandraka Bandaranayaka", Female, 65, "Bandaranayaka", "2024-04", 1, Clinic),
        visit("d-03", "Diabetes", "Mahinda Rajapaksha", Male, 66, "Rajapaksha", "2024-03", 4, Clinic),
        visit("d-04", "Fever", "Chandrika Bandranayaka", Female, 63, "Bandaranayaka", "2024-06", 1, Outside),
        visit("d-05", "Hypertension", "Premadasa", Male, 66, "Premadasa", "2024-06", 3, Clinic),
        visit("d-06", "Asthma", "JR Jayawardhana", Male, 62, "Jayawardhana", "2024-05", 2, Outside),
        visit("d-07", "Fever", "Mitreepala Sirisena", Male, 68, "Sirisena", "2024-04", 1, Clinic),
        visit("d-08", "Hypertension", "Dulani Wickramasinghe", Female, 54, "Wickramasinghe", "2024-02", 2, Outside),
        visit("d-09", "Diabetes", "Tharindu Perera", Male, 48, "Perera", "2024-05", 1, Clinic),
        visit("d-10", "Asthma", "Ishara Perera", Female, 44, "Perera", "2024-03", 2, Clinic),
        visit("d-11", "Fever", "Pramod Silva", Male, 29, "Silva", "2024-06", 1, Outside),
        visit("d-12", "Headache", "Samanthi Silva", Female, 31, "Silva", "2024-05", 1, Clinic),
    ]
}
