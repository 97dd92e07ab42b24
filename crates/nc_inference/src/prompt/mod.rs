//! Prompt construction for article fact-checking.

const ANALYSIS_INSTRUCTIONS: &str = "You are an experienced fact-checker. \
Analyze the news article below and decide whether it is likely to be fake or misleading.

Evaluate the article on:
1. Factual accuracy of the claims it makes
2. Credibility of the sources it relies on
3. Language patterns (sensationalism, clickbait, loaded wording)
4. Logical consistency of the narrative
5. Emotional manipulation aimed at the reader
6. Citation verification (are claims attributed and checkable?)";

const OUTPUT_FORMAT: &str = r#"Respond with ONLY a JSON object and no text before or after it.
The object must contain exactly these fields:
{
  "isFake": true or false,
  "confidence": integer from 0 to 100,
  "features": ["short observation supporting the verdict", "..."],
  "explanation": "a concise explanation of the verdict"
}"#;

/// Build the prompt sent to the model for one article.
pub fn build_analysis_prompt(title: &str, content: &str) -> String {
    let mut prompt = String::with_capacity(
        ANALYSIS_INSTRUCTIONS.len() + OUTPUT_FORMAT.len() + title.len() + content.len() + 64,
    );

    prompt.push_str(ANALYSIS_INSTRUCTIONS);
    prompt.push_str("\n\n");

    prompt.push_str("Title: ");
    prompt.push_str(title);
    prompt.push_str("\n\nContent:\n---\n");
    prompt.push_str(content);
    prompt.push_str("\n---\n\n");

    prompt.push_str(OUTPUT_FORMAT);
    prompt
}
