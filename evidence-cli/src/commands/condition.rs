use anyhow::Result;
use clap::Args;
use evidence_search::ConditionCategory;

use super::{FilterArgs, create_search_service, print_search_result};

#[derive(Args, Debug)]
pub struct Condition {
    /// Condition category (cancer, neurological, cardiovascular, metabolic,
    /// autoimmune, infectious, musculoskeletal) or a free-text condition
    #[arg(value_name = "CONDITION", required = true)]
    condition: String,

    #[command(flatten)]
    options: FilterArgs,
}

impl Condition {
    pub async fn execute_with_config(
        &self,
        api_key: Option<&str>,
        email: Option<&str>,
    ) -> Result<()> {
        let service = create_search_service(api_key, email);

        if ConditionCategory::from_param(&self.condition).is_none() {
            tracing::warn!(
                condition = %self.condition,
                "Not a curated category, searching the text as given"
            );
        }

        let result = service
            .search_by_condition(
                &self.condition,
                self.options.max_results,
                &self.options.filters(),
            )
            .await?;

        print_search_result(&service, &result, self.options.format)
    }
}
