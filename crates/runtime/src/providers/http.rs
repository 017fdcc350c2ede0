//! Image generation through the local AI proxy.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use game_core::Legend;

use super::{CardImageService, GenerationError};

#[derive(Serialize)]
struct GenerateRequest {
    prompt: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(rename = "imageUrl")]
    image_url: String,
}

/// [`CardImageService`] backed by the site's local proxy, which fronts the
/// actual AI image model.
pub struct HttpImageService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpImageService {
    /// Build a client for the proxy at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl CardImageService for HttpImageService {
    async fn generate(&self, legend: &Legend) -> Result<String, GenerationError> {
        let prompt = sticker_prompt(&strip_diacritics(&legend.name));
        debug!(legend = %legend.id, "requesting sticker image");

        let response = self
            .client
            .post(format!("{}/generate-panini-image", self.base_url))
            .json(&GenerateRequest { prompt })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(GenerationError::Status(response.status().as_u16()));
        }
        let body: GenerateResponse = response.json().await?;
        Ok(body.image_url)
    }
}

/// The vintage-sticker prompt sent to the image model.
fn sticker_prompt(player_name: &str) -> String {
    format!(
        "A Panini-style collectible sticker of the legendary football player {player_name}, \
         in the aesthetic of the 1982 World Cup album. The image should look like a scanned \
         vintage sticker, with a portrait of the player in their national team kit from that \
         era. Include characteristic off-set printing artifacts and a slightly faded color \
         palette. The background should be a simple, solid light blue color, typical of \
         stickers from that period. The composition must be a head and shoulders portrait. \
         Do not include any text, logos, or borders on the image itself."
    )
}

/// Replace accented characters with their bare ASCII letter, e.g.
/// "Zlatan Ibrahimović" -> "Zlatan Ibrahimovic". The image model copes
/// badly with diacritics in names.
fn strip_diacritics(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
            'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'A',
            'é' | 'è' | 'ê' | 'ë' | 'ě' => 'e',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ø' => 'o',
            'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' | 'Ø' => 'O',
            'ú' | 'ù' | 'û' | 'ü' | 'ů' => 'u',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            'ç' | 'ć' | 'č' => 'c',
            'Ç' | 'Ć' | 'Č' => 'C',
            'ñ' | 'ń' => 'n',
            'Ñ' => 'N',
            'š' | 'ş' => 's',
            'Š' | 'Ş' => 'S',
            'ž' | 'ź' | 'ż' => 'z',
            'Ž' | 'Ź' | 'Ż' => 'Z',
            'ř' => 'r',
            'ý' => 'y',
            'ł' => 'l',
            'Ł' => 'L',
            other => other,
        })
        .collect()
}
