use std::error::Error;

use async_openai::{
    config::OpenAIConfig,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};

use crate::configuration::OpenaiSettings;

pub struct OpenaiClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenaiClient {
    pub fn new(settings: OpenaiSettings) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(settings.api_key);
        if let Some(api_base) = settings.api_base {
            config = config.with_api_base(api_base);
        }

        OpenaiClient {
            client: Client::with_config(config),
            model: settings.model,
        }
    }

    pub async fn extract_company_details(
        &self,
        site_content: &str,
    ) -> Result<String, Box<dyn Error>> {
        let prompt = build_extraction_prompt(site_content);

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages([ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into()])
            .max_tokens(1000_u32)
            .build()?;

        let response = self.client.chat().create(request).await?;
        log::info!("Response: {:?}", response);

        let first_choice = response
            .choices
            .first()
            .ok_or("No choices in Openai response")?
            .message
            .content
            .clone()
            .ok_or("No content")?;

        Ok(first_choice)
    }
}

pub fn build_extraction_prompt(site_content: &str) -> String {
    format!(
        "Extract the following details from the provided text: {}. \
        Please follow these instructions carefully: \n\n\
        1. *Description*: Extract a brief company description. \n\
        2. *Products/Services*: List the products or services the company offers. \n\
        3. *Use Cases*: Extract use cases where the company's offerings are applied. \n\
        4. *Customers*: Identify key customers of the company. \n\
        5. *Partners*: Identify the company's partners.\n\
        6. *Language*: If the text is not in English, translate it so your entire answer is in English. \n\
        7. *Missing information*: If the text contains no usable company information, use the value 'Not able to scrape' for every key.\n\
        Provide your output strictly as a JSON object with the keys: \
        'description', 'products_services', 'use_cases', 'customers', 'partners'.",
        site_content
    )
}

#[cfg(test)]
mod tests {
    use super::build_extraction_prompt;

    #[test]
    fn prompt_embeds_content_and_names_all_keys() {
        let prompt = build_extraction_prompt("Acme builds rockets");

        assert!(prompt
            .contains("Extract the following details from the provided text: Acme builds rockets."));
        assert!(prompt.contains(
            "'description', 'products_services', 'use_cases', 'customers', 'partners'"
        ));
    }

    #[test]
    fn prompt_carries_translation_and_sentinel_instructions() {
        let prompt = build_extraction_prompt("");

        assert!(prompt.contains("in English"));
        assert!(prompt.contains("Not able to scrape"));
    }
}
