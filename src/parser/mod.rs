pub mod classifier;
pub mod tokenizer;

pub use classifier::{classify, classify_token, ClassifyRule, CLASSIFY_RULES};
pub use tokenizer::{fix_brace_lists, normalize_range, tokenize};
