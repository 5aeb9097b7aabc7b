//! Artpost pipeline composition root
//!
//! Wires the prompt, image, and social services together and runs the four
//! steps in order. The first failing step ends the run; nothing is retried
//! and nothing already created is cleaned up.

use artpost_common::{ApiError, Config, ConfigError, Deadline};
use artpost_imagegen::{ImageConfig, ImageService, ImageServiceFactory};
use artpost_llm::{LlmConfig, LlmService, LlmServiceFactory, DEFAULT_INSTRUCTION};
use artpost_social::{SocialConfig, SocialService, SocialServiceFactory};
use tracing::info;

/// The four pipeline steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    GeneratePrompt,
    GenerateImage,
    CreateMedia,
    PublishMedia,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Step::GeneratePrompt => "generating prompt",
            Step::GenerateImage => "generating image",
            Step::CreateMedia => "creating media",
            Step::PublishMedia => "publishing media",
        };
        f.write_str(name)
    }
}

/// A step failure, tagged with the step that produced it
#[derive(Debug, thiserror::Error)]
#[error("Pipeline failed while {step}: {source}")]
pub struct PipelineError {
    pub step: Step,
    #[source]
    pub source: ApiError,
}

trait StepContext<T> {
    fn during(self, step: Step) -> Result<T, PipelineError>;
}

impl<T> StepContext<T> for Result<T, ApiError> {
    fn during(self, step: Step) -> Result<T, PipelineError> {
        self.map_err(|source| PipelineError { step, source })
    }
}

/// Fixed text fed into the pipeline
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// System instruction for the prompt request
    pub instruction: String,
    /// Prepended to the prompt before image generation
    pub image_prompt_prefix: String,
    /// Prepended to the prompt to form the post caption
    pub caption_prefix: String,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            instruction: DEFAULT_INSTRUCTION.to_string(),
            image_prompt_prefix: "Digital art, ".to_string(),
            caption_prefix: "Prompt: ".to_string(),
        }
    }
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub prompt: String,
    pub encoded_image_url: String,
    pub media_id: String,
}

/// The services one run talks to
pub struct Services {
    pub prompts: Box<dyn LlmService>,
    pub images: Box<dyn ImageService>,
    pub social: Box<dyn SocialService>,
}

impl Services {
    /// Build every service from the application config
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            prompts: LlmServiceFactory::create(LlmConfig::from_config(config))?,
            images: ImageServiceFactory::create(ImageConfig::from_config(config))?,
            social: SocialServiceFactory::create(SocialConfig::from_config(config))?,
        })
    }
}

/// Run prompt → image → create media → publish, aborting on the first error.
pub async fn run_pipeline(
    services: &Services,
    settings: &PipelineSettings,
    deadline: &Deadline,
) -> Result<PipelineReport, PipelineError> {
    let prompt = services
        .prompts
        .generate_prompt(&settings.instruction, deadline)
        .await
        .during(Step::GeneratePrompt)?;
    info!(prompt = %prompt, "Prompt generated");

    let image_prompt = format!("{}{}", settings.image_prompt_prefix, prompt);
    let image = services
        .images
        .generate_image(&image_prompt, deadline)
        .await
        .during(Step::GenerateImage)?;
    info!(encoded_image_url = %image.encoded_url, "Encoded image URL");

    let caption = format!("{}{}", settings.caption_prefix, prompt);
    let media = services
        .social
        .create_media(&image.encoded_url, &caption, deadline)
        .await
        .during(Step::CreateMedia)?;
    info!(media_id = %media, "Media created");

    let media_id = media.id().to_string();
    services
        .social
        .publish_media(media, deadline)
        .await
        .during(Step::PublishMedia)?;

    Ok(PipelineReport {
        prompt,
        encoded_image_url: image.encoded_url,
        media_id,
    })
}
