pub mod use_cases;

pub use use_cases::resolve_answer::ResolveAnswerUseCase;
