use std::fmt;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A loosely typed leaf value. The upstream API is inconsistent about whether
/// numbers arrive as JSON numbers or strings, and occasionally sends arrays or
/// objects where a scalar is expected.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Anything else, kept verbatim.
    Other(Value),
}

impl Scalar {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Float(value) => Some(*value as i64),
            Self::Text(value) => value.trim().parse::<i64>().ok(),
            Self::Bool(_) | Self::Other(_) => None,
        }
    }

    /// Truthiness the way the API uses it for flags like `isSelected`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Int(value) => *value != 0,
            Self::Float(value) => *value != 0.0,
            Self::Text(value) => !value.is_empty() && value != "false" && value != "0",
            Self::Other(Value::Array(items)) => !items.is_empty(),
            Self::Other(Value::Object(fields)) => !fields.is_empty(),
            Self::Other(value) => !value.is_null(),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(value) if value.trim().is_empty())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

/// Body of a successful player-info lookup. Every section and field is
/// optional.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerInfo {
    pub basic_info: Option<BasicInfo>,
    /// `None` unless the response carried a non-empty object, even one whose
    /// keys are all unrecognised.
    #[serde(deserialize_with = "non_empty_section")]
    pub captain_basic_info: Option<CaptainInfo>,
    /// Same presence rule as `captain_basic_info`.
    #[serde(deserialize_with = "non_empty_section")]
    pub clan_basic_info: Option<ClanInfo>,
    pub credit_score_info: Option<CreditScoreInfo>,
    pub pet_info: Option<PetInfo>,
    pub social_info: Option<SocialInfo>,
    /// Cosmetic loadout; not rendered, kept for callers that want it.
    pub profile_info: Option<serde_json::Value>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BasicInfo {
    pub nickname: Option<Scalar>,
    pub level: Option<Scalar>,
    pub exp: Option<Scalar>,
    pub region: Option<Scalar>,
    pub liked: Option<Scalar>,
    pub release_version: Option<Scalar>,
    pub badge_cnt: Option<Scalar>,
    pub ranking_points: Option<Scalar>,
    pub cs_ranking_points: Option<Scalar>,
    pub create_at: Option<Scalar>,
    pub last_login_at: Option<Scalar>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaptainInfo {
    pub nickname: Option<Scalar>,
    pub account_id: Option<Scalar>,
    pub level: Option<Scalar>,
    pub exp: Option<Scalar>,
    pub last_login_at: Option<Scalar>,
    pub title: Option<Scalar>,
    pub badge_cnt: Option<Scalar>,
    pub ranking_points: Option<Scalar>,
    pub cs_ranking_points: Option<Scalar>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClanInfo {
    pub clan_name: Option<Scalar>,
    pub clan_id: Option<Scalar>,
    pub clan_level: Option<Scalar>,
    pub member_num: Option<Scalar>,
    pub capacity: Option<Scalar>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreditScoreInfo {
    pub credit_score: Option<Scalar>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PetInfo {
    pub name: Option<Scalar>,
    pub level: Option<Scalar>,
    pub exp: Option<Scalar>,
    pub is_selected: Option<Scalar>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialInfo {
    pub signature: Option<Scalar>,
}

/// A section is present when it is an object with at least one key; `{}`,
/// `null` and non-object values count as absent.
fn non_empty_section<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(fields)) if !fields.is_empty() => {
            serde_json::from_value(Value::Object(fields))
                .map(Some)
                .map_err(D::Error::custom)
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::{PlayerInfo, Scalar};

    #[test]
    fn numbers_may_arrive_as_strings() {
        let info: PlayerInfo = serde_json::from_str(
            r#"{"basicInfo": {"nickname": "Ace", "level": 65, "createAt": "1600000000"}}"#,
        )
        .unwrap();
        let basic = info.basic_info.unwrap();
        assert_eq!(basic.nickname, Some(Scalar::Text("Ace".to_owned())));
        assert_eq!(basic.level.and_then(|v| v.as_i64()), Some(65));
        assert_eq!(basic.create_at.and_then(|v| v.as_i64()), Some(1_600_000_000));
    }

    #[test]
    fn missing_sections_and_nulls_are_tolerated() {
        let info: PlayerInfo =
            serde_json::from_str(r#"{"petInfo": {"name": null}, "clanBasicInfo": {}}"#).unwrap();
        assert!(info.basic_info.is_none());
        assert!(info.pet_info.unwrap().name.is_none());
        assert!(info.clan_basic_info.is_none());
    }

    #[test]
    fn section_with_only_unknown_keys_is_present() {
        let info: PlayerInfo = serde_json::from_str(
            r#"{"clanBasicInfo": {"guildBadge": 3}, "captainBasicInfo": {"avatar": "x"}}"#,
        )
        .unwrap();
        let clan = info.clan_basic_info.unwrap();
        assert!(clan.clan_name.is_none());
        assert!(info.captain_basic_info.is_some());
    }

    #[test]
    fn non_scalar_values_still_decode() {
        let info: PlayerInfo = serde_json::from_str(
            r#"{"basicInfo": {"nickname": "Ace", "region": ["SG", "IND"], "liked": {"n": 5}}}"#,
        )
        .unwrap();
        let basic = info.basic_info.unwrap();
        assert_eq!(basic.nickname, Some(Scalar::Text("Ace".to_owned())));

        let region = basic.region.unwrap();
        assert_eq!(region.to_string(), r#"["SG","IND"]"#);
        assert_eq!(region.as_i64(), None);
        assert!(region.is_truthy());

        let liked = basic.liked.unwrap();
        assert_eq!(liked.to_string(), r#"{"n":5}"#);
        assert!(!Scalar::Other(serde_json::json!([])).is_truthy());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let info: PlayerInfo = serde_json::from_str(
            r#"{"basicInfo": {"accountId": "1", "weird": [1,2]}, "extra": true, "profileInfo": {"avatarId": 1}}"#,
        )
        .unwrap();
        assert!(info.basic_info.is_some());
        assert!(info.profile_info.is_some());
    }

    #[test]
    fn truthiness_matches_api_flags() {
        assert!(Scalar::Bool(true).is_truthy());
        assert!(!Scalar::Bool(false).is_truthy());
        assert!(Scalar::Int(1).is_truthy());
        assert!(!Scalar::Int(0).is_truthy());
        assert!(!Scalar::Text(String::new()).is_truthy());
        assert!(Scalar::Text("   ".to_owned()).is_blank());
    }
}
