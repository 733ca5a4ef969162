use anyhow::Result;
use clap::Args;

use super::{FilterArgs, create_search_service, print_search_result};

#[derive(Args, Debug)]
pub struct Search {
    /// Search query (free text, PubMed field tags allowed)
    #[arg(value_name = "QUERY", required = true)]
    query: String,

    #[command(flatten)]
    options: FilterArgs,
}

impl Search {
    pub async fn execute_with_config(
        &self,
        api_key: Option<&str>,
        email: Option<&str>,
    ) -> Result<()> {
        let service = create_search_service(api_key, email);

        tracing::info!(query = %self.query, "Searching PubMed");

        let result = service
            .search(&self.query, self.options.max_results, &self.options.filters())
            .await?;

        print_search_result(&service, &result, self.options.format)
    }
}
