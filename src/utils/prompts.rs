use crate::services::SearchResult;

pub fn format_snippet(result: &SearchResult) -> String {
    format!("{} - {} ({})", result.title, result.content, result.url)
}

pub fn generate_business_prompt(query: &str, snippets: &[String]) -> String {
    let listed = snippets
        .iter()
        .map(|snippet| format!("- {}", snippet))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"I have search results about '{}':
{}

Provide me the lists and their location link if available, in a structured way."#,
        query, listed
    )
}
