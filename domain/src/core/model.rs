//! Model value object representing a completion model / deployment

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Completion models known to the token accounting rules (Value Object)
///
/// Hosted deployments are usually named after the model they serve, so the
/// same identifier doubles as the deployment name sent to the provider.
/// Anything else is carried verbatim as [`Model::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // GPT-3.5 models
    Gpt35Turbo,
    Gpt35Turbo0301,
    Gpt35Turbo0613,
    Gpt35Turbo16k0613,
    // GPT-4 models
    Gpt4,
    Gpt40314,
    Gpt40613,
    Gpt432k,
    Gpt432k0314,
    Gpt432k0613,
    Gpt4Turbo,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gpt35Turbo => "gpt-3.5-turbo",
            Model::Gpt35Turbo0301 => "gpt-3.5-turbo-0301",
            Model::Gpt35Turbo0613 => "gpt-3.5-turbo-0613",
            Model::Gpt35Turbo16k0613 => "gpt-3.5-turbo-16k-0613",
            Model::Gpt4 => "gpt-4",
            Model::Gpt40314 => "gpt-4-0314",
            Model::Gpt40613 => "gpt-4-0613",
            Model::Gpt432k => "gpt-4-32k",
            Model::Gpt432k0314 => "gpt-4-32k-0314",
            Model::Gpt432k0613 => "gpt-4-32k-0613",
            Model::Gpt4Turbo => "gpt-4-turbo",
            Model::Custom(s) => s,
        }
    }

    /// Check if this is a GPT-3.5 model (Azure spells it `gpt-35`)
    pub fn is_gpt35(&self) -> bool {
        let id = self.as_str();
        id.contains("gpt-3.5-turbo") || id.contains("gpt-35-turbo")
    }

    /// Check if this is a GPT-4 model
    pub fn is_gpt4(&self) -> bool {
        self.as_str().contains("gpt-4")
    }
}

impl Default for Model {
    /// Returns the default model (GPT-4 Turbo)
    fn default() -> Self {
        Model::Gpt4Turbo
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "gpt-3.5-turbo" => Model::Gpt35Turbo,
            "gpt-3.5-turbo-0301" => Model::Gpt35Turbo0301,
            "gpt-3.5-turbo-0613" => Model::Gpt35Turbo0613,
            "gpt-3.5-turbo-16k-0613" => Model::Gpt35Turbo16k0613,
            "gpt-4" => Model::Gpt4,
            "gpt-4-0314" => Model::Gpt40314,
            "gpt-4-0613" => Model::Gpt40613,
            "gpt-4-32k" => Model::Gpt432k,
            "gpt-4-32k-0314" => Model::Gpt432k0314,
            "gpt-4-32k-0613" => Model::Gpt432k0613,
            "gpt-4-turbo" => Model::Gpt4Turbo,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(model) => model,
            Err(never) => match never {},
        }
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from(s.as_str()))
    }
}
