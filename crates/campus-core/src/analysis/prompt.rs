//! Prompt templates, one per [`AnalysisType`].

use super::model::AnalysisType;

impl AnalysisType {
    /// Render the prompt for this mode around `code`.
    pub fn prompt(&self, language: &str, code: &str) -> String {
        let code_block = code_block(language, code);
        match self {
            Self::Hint => hint_prompt(language, &code_block),
            Self::Debug => debug_prompt(language, &code_block),
            Self::Review => review_prompt(language, &code_block),
        }
    }
}

/// Fence `code` in a markdown block tagged with `language`.
pub fn code_block(language: &str, code: &str) -> String {
    format!("```{}\n{}\n```", language, code)
}

fn hint_prompt(language: &str, code_block: &str) -> String {
    format!(
        "Act as an expert programming tutor. Provide ONE concise, helpful hint for the following {language} code. \
Guide the user towards solving potential issues or improving their approach without giving away the direct answer. \
Focus on concepts, syntax, or logic flaws. Avoid conversational filler.

Code:
{code_block}

Hint:"
    )
}

fn debug_prompt(language: &str, code_block: &str) -> String {
    format!(
        "Act as an expert code debugger. Analyze the following {language} code for potential bugs, logical errors, or runtime issues. \
Explain the most likely primary issue clearly and suggest a specific fix or investigation path. \
If multiple issues exist, focus on the most critical one. Avoid conversational filler.

Code:
{code_block}

Debugging Analysis:"
    )
}

fn review_prompt(language: &str, code_block: &str) -> String {
    format!(
        "Act as an expert code reviewer. Provide a concise review of the following {language} code based on:
1.  **Correctness & Bugs:** Identify potential errors or missed edge cases.
2.  **Clarity & Readability:** Assess code structure, comments, and naming.
3.  **Best Practices:** Check adherence to {language} conventions.
4.  **Efficiency:** Briefly mention obvious performance issues if any.

Format the feedback clearly using markdown lists.
Conclude the review with ONLY a rating line in the format \"Rating: X/10\". \
Provide this rating even if the code is empty or incorrect. Avoid conversational filler.

Code:
{code_block}

Code Review:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_block_is_fenced_with_language() {
        assert_eq!(code_block("rust", "fn main() {}"), "```rust\nfn main() {}\n```");
    }

    #[test]
    fn test_review_prompt_covers_four_axes_and_rating() {
        let prompt = AnalysisType::Review.prompt("python", "print('hi')");
        assert!(prompt.starts_with("Act as an expert code reviewer."));
        assert!(prompt.contains("**Correctness & Bugs:**"));
        assert!(prompt.contains("**Clarity & Readability:**"));
        assert!(prompt.contains("**Best Practices:** Check adherence to python conventions."));
        assert!(prompt.contains("**Efficiency:**"));
        assert!(prompt.contains("\"Rating: X/10\""));
        assert!(prompt.contains("```python\nprint('hi')\n```"));
        assert!(prompt.ends_with("Code Review:"));
    }

    #[test]
    fn test_debug_prompt() {
        let prompt = AnalysisType::Debug.prompt("c", "int main() { return 1/0; }");
        assert!(prompt.starts_with("Act as an expert code debugger."));
        assert!(prompt.contains("most likely primary issue"));
        assert!(prompt.ends_with("Debugging Analysis:"));
        assert!(!prompt.contains("Rating: X/10"));
    }

    #[test]
    fn test_hint_prompt() {
        let prompt = AnalysisType::Hint.prompt("java", "class A {}");
        assert!(prompt.starts_with("Act as an expert programming tutor."));
        assert!(prompt.contains("ONE concise, helpful hint for the following java code"));
        assert!(prompt.ends_with("Hint:"));
        assert!(!prompt.contains("Rating: X/10"));
    }

    #[test]
    fn test_templates_are_distinct() {
        let review = AnalysisType::Review.prompt("go", "x");
        let debug = AnalysisType::Debug.prompt("go", "x");
        let hint = AnalysisType::Hint.prompt("go", "x");
        assert_ne!(review, debug);
        assert_ne!(review, hint);
        assert_ne!(debug, hint);
    }

    #[test]
    fn test_filler_instruction_in_every_template() {
        for kind in [AnalysisType::Review, AnalysisType::Debug, AnalysisType::Hint] {
            assert!(kind.prompt("code", "x").contains("Avoid conversational filler."));
        }
    }
}
