use serde::{Deserialize, Serialize};

/// Kind of service a queue ticket waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    Bank,
    Restaurant,
    Healthcare,
    School,
}

impl ServiceType {
    pub const ALL: [ServiceType; 4] = [
        ServiceType::Bank,
        ServiceType::Restaurant,
        ServiceType::Healthcare,
        ServiceType::School,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Bank => "Bank",
            ServiceType::Restaurant => "Restaurant",
            ServiceType::Healthcare => "Healthcare",
            ServiceType::School => "School",
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bank" => Ok(ServiceType::Bank),
            "restaurant" => Ok(ServiceType::Restaurant),
            "healthcare" => Ok(ServiceType::Healthcare),
            "school" => Ok(ServiceType::School),
            _ => Err(format!(
                "Invalid service type: {}. Must be one of Bank, Restaurant, Healthcare, School",
                s
            )),
        }
    }
}
