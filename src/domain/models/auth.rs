use serde::{Deserialize, Serialize};

/// Bearer token payload: the identity the rest of the service trusts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,

    #[serde(rename = "isArtist")]
    pub is_artist: bool,

    #[serde(rename = "artistId", skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<String>,

    pub exp: usize,
    pub iat: usize,
}
