use crate::ir::{Category, Token};

/// One line-classification rule. Rules are tried in ascending `priority`
/// against each token, left to right; the first hit decides the category.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyRule {
    pub priority: u8,
    pub category: Category,
    pub matches: fn(&str) -> bool,
}

fn is_quoted(token: &str) -> bool {
    token.contains('"')
}

fn is_register_assign(token: &str) -> bool {
    token == "<="
}

fn is_wire_assign(token: &str) -> bool {
    token == "="
}

fn ends_statement(token: &str) -> bool {
    token.ends_with(';')
}

pub const CLASSIFY_RULES: [ClassifyRule; 4] = [
    ClassifyRule {
        priority: 1,
        category: Category::Comment,
        matches: is_quoted,
    },
    ClassifyRule {
        priority: 2,
        category: Category::RegisterAssignment,
        matches: is_register_assign,
    },
    ClassifyRule {
        priority: 3,
        category: Category::WireAssignment,
        matches: is_wire_assign,
    },
    ClassifyRule {
        priority: 4,
        category: Category::Declaration,
        matches: ends_statement,
    },
];

/// Category of a single token, if any rule matches it.
pub fn classify_token(token: &str) -> Option<Category> {
    CLASSIFY_RULES
        .iter()
        .find(|rule| (rule.matches)(token))
        .map(|rule| rule.category)
}

/// Scan tokens in order; the first token matched by any rule decides.
pub fn classify(tokens: &[Token]) -> Category {
    tokens
        .iter()
        .find_map(|token| classify_token(token))
        .unwrap_or(Category::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> Vec<Token> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_rules_are_priority_ordered() {
        let priorities: Vec<u8> = CLASSIFY_RULES.iter().map(|r| r.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort();
        assert_eq!(priorities, sorted);
    }

    #[test]
    fn test_basic_categories() {
        assert_eq!(classify(&line("q <= d;")), Category::RegisterAssignment);
        assert_eq!(classify(&line("y = a b;")), Category::WireAssignment);
        assert_eq!(classify(&line("a b[3:0] c;")), Category::Declaration);
        assert_eq!(classify(&line("\"Counter\";")), Category::Comment);
        assert_eq!(classify(&line("")), Category::Unknown);
        assert_eq!(classify(&line("foo bar")), Category::Unknown);
    }

    #[test]
    fn test_first_token_wins() {
        // `a;` ends a statement before the `=` is reached
        assert_eq!(classify(&line("a; = b")), Category::Declaration);
        // quote on the first token beats a later `<=`
        assert_eq!(classify(&line("\"x <= y\";")), Category::Comment);
    }

    #[test]
    fn test_rule_order_within_one_token() {
        // a quoted token that also ends with `;` is a comment
        assert_eq!(classify_token("\"done\";"), Some(Category::Comment));
        assert_eq!(classify_token("<="), Some(Category::RegisterAssignment));
        assert_eq!(classify_token("x"), None);
    }

    #[test]
    fn test_comment_after_declaration_token() {
        // the declaration token comes first, so it decides
        assert_eq!(classify(&line("a; \"note\"")), Category::Declaration);
        assert_eq!(classify(&line("a b \"note\" c;")), Category::Comment);
    }
}
