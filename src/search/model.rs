//! Shodan 接口响应模型（缺失字段按默认值处理）

use serde::{Deserialize, Serialize};

/// `/api-info` 响应
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiInfo {
    pub query_credits: i64,
    pub scan_credits: i64,
    pub plan: String,
    pub https: bool,
    pub unlocked: bool,
}

impl ApiInfo {
    /// dev / free 计划的检索结果受限
    pub fn is_limited(&self) -> bool {
        matches!(self.plan.as_str(), "dev" | "free")
    }
}

/// `/shodan/host/search` 响应
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchResponse {
    pub matches: Vec<HostMatch>,
    pub total: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HostMatch {
    #[serde(rename = "ip_str")]
    pub ip: String,
    pub hostnames: Vec<String>,
    pub domains: Vec<String>,
    pub port: u16,
    pub location: Location,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Location {
    #[serde(rename = "country_name")]
    pub country: Option<String>,
    pub city: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_search_response() {
        let raw = r#"{
            "matches": [
                {
                    "ip_str": "203.0.113.7",
                    "port": 443,
                    "hostnames": ["gw.example.org"],
                    "domains": ["example.org"],
                    "location": {"country_name": "Netherlands", "city": null},
                    "http": {"favicon": {"hash": -964311617}}
                },
                {"ip_str": "198.51.100.2", "port": 8080}
            ],
            "total": 2
        }"#;

        let resp: SearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.total, 2);
        assert_eq!(resp.matches[0].ip, "203.0.113.7");
        assert_eq!(resp.matches[0].location.country.as_deref(), Some("Netherlands"));
        assert_eq!(resp.matches[0].location.city, None);
        assert!(resp.matches[1].hostnames.is_empty());
        assert_eq!(resp.matches[1].port, 8080);
    }

    #[test]
    fn test_plan_limits() {
        let info: ApiInfo = serde_json::from_str(r#"{"plan": "dev", "query_credits": 100}"#).unwrap();
        assert!(info.is_limited());
        assert_eq!(info.query_credits, 100);
        assert_eq!(info.scan_credits, 0);

        let paid = ApiInfo {
            plan: "corp".into(),
            ..ApiInfo::default()
        };
        assert!(!paid.is_limited());
    }
}
