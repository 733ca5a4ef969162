use std::io::Write;

use anyhow::Result;
use clap::Args;

use super::{OutputFormat, create_search_service};

#[derive(Args, Debug)]
pub struct Fallback {
    /// Topic to ask about
    #[arg(value_name = "QUERY", required = true)]
    query: String,

    /// Extra context passed to the model (e.g. what the search returned)
    #[arg(long)]
    context: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

impl Fallback {
    pub async fn execute_with_config(
        &self,
        api_key: Option<&str>,
        email: Option<&str>,
    ) -> Result<()> {
        let service = create_search_service(api_key, email);

        let answer = service
            .augment_with_fallback(&self.query, self.context.as_deref())
            .await?;

        let mut stdout = std::io::stdout();
        match self.format {
            OutputFormat::Json => {
                writeln!(stdout, "{}", serde_json::to_string_pretty(&answer)?)?;
            }
            OutputFormat::Text => {
                writeln!(stdout, "[{}] {}", answer.source.as_str(), answer.summary)?;
                if !answer.suggested_terms.is_empty() {
                    writeln!(stdout)?;
                    writeln!(stdout, "Suggested terms: {}", answer.suggested_terms.join(", "))?;
                }
                if !answer.related_topics.is_empty() {
                    writeln!(stdout, "Related topics: {}", answer.related_topics.join(", "))?;
                }
            }
        }

        Ok(())
    }
}
