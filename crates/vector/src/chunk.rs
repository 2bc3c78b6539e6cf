use rabbitrag_common::Record;

/// Flatten a record into its retrieval chunk:
/// `"{name} ({type}, {age}, {gender}): {description}"`
pub fn record_to_chunk(record: &Record) -> String {
    format!(
        "{} ({}, {}, {}): {}",
        record.name, record.pet_type, record.age, record.gender, record.description
    )
}
