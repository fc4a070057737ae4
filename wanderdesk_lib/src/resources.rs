//! Per-resource page configuration: which fields the form edits, which
//! columns the listing shows, and how the list and publish flag behave.

use serde::Serialize;
use wanderdesk_api::types::Record;
use wanderdesk_api::Resource;

use crate::error::AdminError;
use crate::fields::{validate_descriptors, FieldDescriptor};
use crate::validation::truthy;

/// A listing column: record key plus header text.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Column {
    pub key: String,
    pub header: String,
}

/// Everything the generic page controller needs to know about one resource.
#[derive(Serialize, Clone, Debug)]
pub struct ResourceConfig {
    pub resource: Resource,
    /// Human name of one record, e.g. "Flight".
    pub singular: String,
    pub fields: Vec<FieldDescriptor>,
    pub columns: Vec<Column>,
    /// Whether the list endpoint is fetched page by page.
    pub paginated: bool,
    /// Record key holding the publish flag; `None` when not publishable.
    pub publish_field: Option<String>,
}

impl ResourceConfig {
    pub fn new(resource: Resource, singular: &str, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            resource,
            singular: singular.to_string(),
            fields,
            columns: Vec::new(),
            paginated: true,
            publish_field: None,
        }
    }

    pub fn columns(mut self, columns: &[(&str, &str)]) -> Self {
        self.columns = columns
            .iter()
            .map(|(key, header)| Column {
                key: key.to_string(),
                header: header.to_string(),
            })
            .collect();
        self
    }

    pub fn unpaginated(mut self) -> Self {
        self.paginated = false;
        self
    }

    pub fn publishable(mut self, field: &str) -> Self {
        self.publish_field = Some(field.to_string());
        self
    }

    pub fn is_publishable(&self) -> bool {
        self.publish_field.is_some()
    }

    /// The record's publish flag, read as a boolean whatever its encoding.
    pub fn published(&self, record: &Record) -> Option<bool> {
        let field = self.publish_field.as_deref()?;
        record.get(field).and_then(truthy)
    }

    pub fn validate(&self) -> Result<(), AdminError> {
        validate_descriptors(&self.fields)
    }
}

/// The configuration of one resource.
pub fn config_for(resource: Resource) -> ResourceConfig {
    match resource {
        Resource::Flights => flights(),
        Resource::Accommodations => accommodations(),
        Resource::Packages => packages(),
        Resource::Vehicles => vehicles(),
        Resource::Activities => activities(),
        Resource::Destinations => destinations(),
        Resource::Bookings => bookings(),
        Resource::Leads => leads(),
        Resource::Feedback => feedback(),
        Resource::Finances => finances(),
        Resource::Gifts => gifts(),
        Resource::Guides => guides(),
        Resource::Stories => stories(),
        Resource::Toolkits => toolkits(),
        Resource::Checklists => checklists(),
        Resource::Games => games(),
        Resource::Maps => maps(),
    }
}

/// Every resource configuration, in menu order.
pub fn catalog() -> Vec<ResourceConfig> {
    Resource::ALL.iter().map(|r| config_for(*r)).collect()
}

const STAR_RATINGS: &[(&str, &str)] = &[
    ("1", "1 star"),
    ("2", "2 stars"),
    ("3", "3 stars"),
    ("4", "4 stars"),
    ("5", "5 stars"),
];

fn flights() -> ResourceConfig {
    ResourceConfig::new(
        Resource::Flights,
        "Flight",
        vec![
            FieldDescriptor::text("airline", "Airline").required(),
            FieldDescriptor::text("flight_number", "Flight number")
                .required()
                .placeholder("TP1234"),
            FieldDescriptor::text("from", "From").required().placeholder("LIS"),
            FieldDescriptor::text("to", "To").required().placeholder("MAD"),
            FieldDescriptor::datetime("departure_time", "Departure").required(),
            FieldDescriptor::datetime("arrival_time", "Arrival"),
            FieldDescriptor::select(
                "class",
                "Class",
                &[
                    ("economy", "Economy"),
                    ("premium", "Premium economy"),
                    ("business", "Business"),
                    ("first", "First"),
                ],
            ),
            FieldDescriptor::number("price", "Price").required(),
            FieldDescriptor::number("seats", "Seats"),
            FieldDescriptor::file("image", "Image"),
        ],
    )
    .columns(&[
        ("id", "ID"),
        ("flight_number", "Flight"),
        ("airline", "Airline"),
        ("from", "From"),
        ("to", "To"),
        ("departure_time", "Departure"),
        ("price", "Price"),
        ("published", "Status"),
    ])
    .publishable("published")
}

fn accommodations() -> ResourceConfig {
    ResourceConfig::new(
        Resource::Accommodations,
        "Accommodation",
        vec![
            FieldDescriptor::text("name", "Name").required(),
            FieldDescriptor::select(
                "type",
                "Type",
                &[
                    ("hotel", "Hotel"),
                    ("hostel", "Hostel"),
                    ("apartment", "Apartment"),
                    ("villa", "Villa"),
                    ("resort", "Resort"),
                ],
            )
            .required(),
            FieldDescriptor::text("destination_id", "Destination ID").required(),
            FieldDescriptor::text("address", "Address"),
            FieldDescriptor::select("stars", "Stars", STAR_RATINGS),
            FieldDescriptor::number("price_per_night", "Price per night").required(),
            FieldDescriptor::textarea("description", "Description"),
            FieldDescriptor::textarea("amenities", "Amenities").placeholder("wifi, pool, parking"),
            FieldDescriptor::file("image", "Image"),
        ],
    )
    .columns(&[
        ("id", "ID"),
        ("name", "Name"),
        ("type", "Type"),
        ("stars", "Stars"),
        ("price_per_night", "Per night"),
        ("published", "Status"),
    ])
    .publishable("published")
}

fn packages() -> ResourceConfig {
    ResourceConfig::new(
        Resource::Packages,
        "Package",
        vec![
            FieldDescriptor::text("title", "Title").required(),
            FieldDescriptor::text("destination_id", "Destination ID").required(),
            FieldDescriptor::number("duration_days", "Duration (days)").required(),
            FieldDescriptor::number("price", "Price").required(),
            FieldDescriptor::datetime("start_date", "Start date"),
            FieldDescriptor::textarea("description", "Description"),
            FieldDescriptor::textarea("includes", "Includes").placeholder("one item per line"),
            FieldDescriptor::switch("featured", "Featured"),
            FieldDescriptor::file("image", "Image"),
        ],
    )
    .columns(&[
        ("id", "ID"),
        ("title", "Title"),
        ("duration_days", "Days"),
        ("price", "Price"),
        ("featured", "Featured"),
        ("published", "Status"),
    ])
    .publishable("published")
}

fn vehicles() -> ResourceConfig {
    ResourceConfig::new(
        Resource::Vehicles,
        "Vehicle",
        vec![
            FieldDescriptor::text("name", "Name").required(),
            FieldDescriptor::select(
                "type",
                "Type",
                &[
                    ("car", "Car"),
                    ("van", "Van"),
                    ("bus", "Bus"),
                    ("motorbike", "Motorbike"),
                    ("boat", "Boat"),
                ],
            )
            .required(),
            FieldDescriptor::text("brand", "Brand"),
            FieldDescriptor::number("seats", "Seats"),
            FieldDescriptor::select(
                "transmission",
                "Transmission",
                &[("manual", "Manual"), ("automatic", "Automatic")],
            ),
            FieldDescriptor::number("price_per_day", "Price per day").required(),
            FieldDescriptor::switch("available", "Available"),
            FieldDescriptor::file("image", "Image"),
        ],
    )
    .columns(&[
        ("id", "ID"),
        ("name", "Name"),
        ("type", "Type"),
        ("seats", "Seats"),
        ("price_per_day", "Per day"),
        ("available", "Available"),
        ("published", "Status"),
    ])
    .publishable("published")
}

fn activities() -> ResourceConfig {
    ResourceConfig::new(
        Resource::Activities,
        "Activity",
        vec![
            FieldDescriptor::text("name", "Name").required(),
            FieldDescriptor::text("destination_id", "Destination ID").required(),
            FieldDescriptor::select(
                "category",
                "Category",
                &[
                    ("tour", "Tour"),
                    ("adventure", "Adventure"),
                    ("food", "Food & drink"),
                    ("culture", "Culture"),
                    ("wellness", "Wellness"),
                ],
            ),
            FieldDescriptor::number("duration_hours", "Duration (hours)"),
            FieldDescriptor::number("price", "Price").required(),
            FieldDescriptor::textarea("description", "Description"),
            FieldDescriptor::file("image", "Image"),
        ],
    )
    .columns(&[
        ("id", "ID"),
        ("name", "Name"),
        ("category", "Category"),
        ("price", "Price"),
        ("published", "Status"),
    ])
    .unpaginated()
    .publishable("published")
}

fn destinations() -> ResourceConfig {
    ResourceConfig::new(
        Resource::Destinations,
        "Destination",
        vec![
            FieldDescriptor::text("name", "Name").required(),
            FieldDescriptor::text("country", "Country").required(),
            FieldDescriptor::text("region", "Region"),
            FieldDescriptor::select(
                "best_season",
                "Best season",
                &[
                    ("spring", "Spring"),
                    ("summer", "Summer"),
                    ("autumn", "Autumn"),
                    ("winter", "Winter"),
                    ("all-year", "All year"),
                ],
            ),
            FieldDescriptor::textarea("description", "Description"),
            FieldDescriptor::file("image", "Image"),
        ],
    )
    .columns(&[
        ("id", "ID"),
        ("name", "Name"),
        ("country", "Country"),
        ("best_season", "Best season"),
        ("published", "Status"),
    ])
    .unpaginated()
    .publishable("published")
}

fn bookings() -> ResourceConfig {
    ResourceConfig::new(
        Resource::Bookings,
        "Booking",
        vec![
            FieldDescriptor::text("customer_name", "Customer").required(),
            FieldDescriptor::text("customer_email", "Email").required(),
            FieldDescriptor::select(
                "resource_type",
                "Booked item",
                &[
                    ("flight", "Flight"),
                    ("accommodation", "Accommodation"),
                    ("package", "Package"),
                    ("vehicle", "Vehicle"),
                    ("activity", "Activity"),
                ],
            )
            .required(),
            FieldDescriptor::text("resource_id", "Item ID").required(),
            FieldDescriptor::datetime("travel_date", "Travel date").required(),
            FieldDescriptor::number("travellers", "Travellers"),
            FieldDescriptor::number("total_price", "Total price"),
            FieldDescriptor::select(
                "status",
                "Status",
                &[
                    ("pending", "Pending"),
                    ("confirmed", "Confirmed"),
                    ("cancelled", "Cancelled"),
                    ("completed", "Completed"),
                ],
            )
            .required(),
            FieldDescriptor::textarea("notes", "Notes"),
        ],
    )
    .columns(&[
        ("id", "ID"),
        ("customer_name", "Customer"),
        ("resource_type", "Item"),
        ("travel_date", "Travel date"),
        ("total_price", "Total"),
        ("status", "Status"),
    ])
}

fn leads() -> ResourceConfig {
    ResourceConfig::new(
        Resource::Leads,
        "Lead",
        vec![
            FieldDescriptor::text("name", "Name").required(),
            FieldDescriptor::text("email", "Email").required(),
            FieldDescriptor::text("phone", "Phone"),
            FieldDescriptor::select(
                "source",
                "Source",
                &[
                    ("website", "Website"),
                    ("referral", "Referral"),
                    ("social", "Social media"),
                    ("event", "Event"),
                    ("other", "Other"),
                ],
            ),
            FieldDescriptor::textarea("interest", "Interest"),
            FieldDescriptor::select(
                "status",
                "Status",
                &[
                    ("new", "New"),
                    ("contacted", "Contacted"),
                    ("qualified", "Qualified"),
                    ("lost", "Lost"),
                ],
            ),
        ],
    )
    .columns(&[
        ("id", "ID"),
        ("name", "Name"),
        ("email", "Email"),
        ("source", "Source"),
        ("status", "Status"),
    ])
}

fn feedback() -> ResourceConfig {
    ResourceConfig::new(
        Resource::Feedback,
        "Feedback",
        vec![
            FieldDescriptor::text("customer_name", "Customer").required(),
            FieldDescriptor::select("rating", "Rating", STAR_RATINGS).required(),
            FieldDescriptor::textarea("comment", "Comment").required(),
            FieldDescriptor::text("booking_id", "Booking ID"),
        ],
    )
    .columns(&[
        ("id", "ID"),
        ("customer_name", "Customer"),
        ("rating", "Rating"),
        ("comment", "Comment"),
        ("published", "Status"),
    ])
    .publishable("published")
}

fn finances() -> ResourceConfig {
    ResourceConfig::new(
        Resource::Finances,
        "Finance entry",
        vec![
            FieldDescriptor::text("title", "Title").required(),
            FieldDescriptor::select("kind", "Kind", &[("income", "Income"), ("expense", "Expense")])
                .required(),
            FieldDescriptor::number("amount", "Amount").required(),
            FieldDescriptor::select(
                "currency",
                "Currency",
                &[("EUR", "EUR"), ("USD", "USD"), ("GBP", "GBP")],
            ),
            FieldDescriptor::datetime("date", "Date").required(),
            FieldDescriptor::text("category", "Category"),
            FieldDescriptor::textarea("notes", "Notes"),
        ],
    )
    .columns(&[
        ("id", "ID"),
        ("date", "Date"),
        ("title", "Title"),
        ("kind", "Kind"),
        ("amount", "Amount"),
        ("currency", "Currency"),
    ])
}

fn gifts() -> ResourceConfig {
    ResourceConfig::new(
        Resource::Gifts,
        "Gift",
        vec![
            FieldDescriptor::text("name", "Name").required(),
            FieldDescriptor::text("code", "Code").required(),
            FieldDescriptor::number("value", "Value").required(),
            FieldDescriptor::datetime("valid_until", "Valid until"),
            FieldDescriptor::textarea("description", "Description"),
            FieldDescriptor::file("image", "Image"),
        ],
    )
    .columns(&[
        ("id", "ID"),
        ("name", "Name"),
        ("code", "Code"),
        ("value", "Value"),
        ("valid_until", "Valid until"),
        ("status", "Status"),
    ])
    .unpaginated()
    .publishable("status")
}

fn guides() -> ResourceConfig {
    ResourceConfig::new(
        Resource::Guides,
        "Guide",
        vec![
            FieldDescriptor::text("title", "Title").required(),
            FieldDescriptor::text("destination_id", "Destination ID"),
            FieldDescriptor::text("author", "Author"),
            FieldDescriptor::textarea("summary", "Summary"),
            FieldDescriptor::textarea("content", "Content").required(),
            FieldDescriptor::file("image", "Cover image"),
        ],
    )
    .columns(&[
        ("id", "ID"),
        ("title", "Title"),
        ("author", "Author"),
        ("published", "Status"),
    ])
    .publishable("published")
}

fn stories() -> ResourceConfig {
    ResourceConfig::new(
        Resource::Stories,
        "Story",
        vec![
            FieldDescriptor::text("title", "Title").required(),
            FieldDescriptor::text("author", "Author").required(),
            FieldDescriptor::textarea("excerpt", "Excerpt"),
            FieldDescriptor::textarea("content", "Content").required(),
            FieldDescriptor::file("image", "Image"),
        ],
    )
    .columns(&[
        ("id", "ID"),
        ("title", "Title"),
        ("author", "Author"),
        ("published", "Status"),
    ])
    .publishable("published")
}

fn toolkits() -> ResourceConfig {
    ResourceConfig::new(
        Resource::Toolkits,
        "Toolkit",
        vec![
            FieldDescriptor::text("title", "Title").required(),
            FieldDescriptor::select(
                "category",
                "Category",
                &[
                    ("planning", "Planning"),
                    ("packing", "Packing"),
                    ("budget", "Budget"),
                    ("safety", "Safety"),
                ],
            ),
            FieldDescriptor::textarea("description", "Description"),
            FieldDescriptor::text("link", "Download link"),
            FieldDescriptor::file("image", "Image"),
        ],
    )
    .columns(&[
        ("id", "ID"),
        ("title", "Title"),
        ("category", "Category"),
        ("published", "Status"),
    ])
    .unpaginated()
    .publishable("published")
}

fn checklists() -> ResourceConfig {
    ResourceConfig::new(
        Resource::Checklists,
        "Checklist",
        vec![
            FieldDescriptor::text("title", "Title").required(),
            FieldDescriptor::select(
                "category",
                "Category",
                &[
                    ("packing", "Packing"),
                    ("documents", "Documents"),
                    ("health", "Health"),
                    ("before-departure", "Before departure"),
                ],
            ),
            FieldDescriptor::textarea("items", "Items")
                .required()
                .placeholder("one item per line"),
        ],
    )
    .columns(&[
        ("id", "ID"),
        ("title", "Title"),
        ("category", "Category"),
        ("published", "Status"),
    ])
    .unpaginated()
    .publishable("published")
}

fn games() -> ResourceConfig {
    ResourceConfig::new(
        Resource::Games,
        "Game",
        vec![
            FieldDescriptor::text("title", "Title").required(),
            FieldDescriptor::select(
                "kind",
                "Kind",
                &[("quiz", "Quiz"), ("puzzle", "Puzzle"), ("trivia", "Trivia")],
            ),
            FieldDescriptor::textarea("description", "Description"),
            FieldDescriptor::text("link", "Link").required(),
            FieldDescriptor::file("image", "Image"),
        ],
    )
    .columns(&[
        ("id", "ID"),
        ("title", "Title"),
        ("kind", "Kind"),
        ("published", "Status"),
    ])
    .unpaginated()
    .publishable("published")
}

fn maps() -> ResourceConfig {
    ResourceConfig::new(
        Resource::Maps,
        "Map",
        vec![
            FieldDescriptor::text("title", "Title").required(),
            FieldDescriptor::text("destination_id", "Destination ID"),
            FieldDescriptor::text("embed_url", "Embed URL").required(),
            FieldDescriptor::textarea("description", "Description"),
            FieldDescriptor::file("image", "Preview image"),
        ],
    )
    .columns(&[
        ("id", "ID"),
        ("title", "Title"),
        ("destination_id", "Destination"),
        ("published", "Status"),
    ])
    .unpaginated()
    .publishable("published")
}
