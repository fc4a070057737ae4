//! The backend collections the admin client knows how to address.

use std::str::FromStr;

/// One backend-managed entity type with its own REST collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    Flights,
    Accommodations,
    Packages,
    Vehicles,
    Activities,
    Destinations,
    Bookings,
    Leads,
    Feedback,
    Finances,
    Gifts,
    Guides,
    Stories,
    Toolkits,
    Checklists,
    Games,
    Maps,
}

impl Resource {
    /// Every resource, in menu order.
    pub const ALL: [Resource; 17] = [
        Resource::Flights,
        Resource::Accommodations,
        Resource::Packages,
        Resource::Vehicles,
        Resource::Activities,
        Resource::Destinations,
        Resource::Bookings,
        Resource::Leads,
        Resource::Feedback,
        Resource::Finances,
        Resource::Gifts,
        Resource::Guides,
        Resource::Stories,
        Resource::Toolkits,
        Resource::Checklists,
        Resource::Games,
        Resource::Maps,
    ];

    /// URL path segment of the collection (without slashes).
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Flights => "flights",
            Resource::Accommodations => "accommodations",
            Resource::Packages => "packages",
            Resource::Vehicles => "vehicles",
            Resource::Activities => "activities",
            Resource::Destinations => "destinations",
            Resource::Bookings => "bookings",
            Resource::Leads => "leads",
            Resource::Feedback => "feedback",
            Resource::Finances => "finances",
            Resource::Gifts => "gifts",
            Resource::Guides => "guides",
            Resource::Stories => "stories",
            Resource::Toolkits => "toolkits",
            Resource::Checklists => "checklists",
            Resource::Games => "games",
            Resource::Maps => "maps",
        }
    }

    /// Key under which list endpoints return the items array.
    pub fn collection_key(&self) -> &'static str {
        match self {
            Resource::Feedback => "feedbacks",
            other => other.path(),
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl serde::Serialize for Resource {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.path())
    }
}

impl FromStr for Resource {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Resource::ALL
            .iter()
            .copied()
            .find(|r| r.path() == wanted || r.collection_key() == wanted)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_path_and_collection_key() {
        assert_eq!("flights".parse::<Resource>(), Ok(Resource::Flights));
        assert_eq!(" Maps ".parse::<Resource>(), Ok(Resource::Maps));
        assert_eq!("feedbacks".parse::<Resource>(), Ok(Resource::Feedback));
        assert_eq!("spaceships".parse::<Resource>(), Err(()));
    }

    #[test]
    fn paths_are_unique() {
        let mut paths: Vec<_> = Resource::ALL.iter().map(|r| r.path()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), Resource::ALL.len());
    }
}
