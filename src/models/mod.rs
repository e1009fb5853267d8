pub mod curriculum;
pub mod learning_material;
pub mod student_answer;
