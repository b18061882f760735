// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Answer extraction from uploaded CSV and ZIP-of-CSV files

mod answer_extractor;

pub use answer_extractor::extract_answer;
