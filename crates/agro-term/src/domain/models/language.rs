use strum::EnumIter;
use strum::EnumString;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, EnumIter, EnumString, strum::Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Language {
    #[default]
    Es,
    En,
}

impl Language {
    /// Language from configuration first, then the stored preference, then Spanish.
    pub fn resolve(configured: Option<Language>, stored: Option<&str>) -> Language {
        if let Some(language) = configured {
            return language;
        }

        return stored
            .and_then(|code| code.trim().parse().ok())
            .unwrap_or_default();
    }
}
