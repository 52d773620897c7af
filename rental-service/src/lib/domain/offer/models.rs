use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::access::Authored;
use crate::domain::offer::errors::OfferIdError;
use crate::domain::offer::errors::OfferValidationError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Offers returned by the index when no limit is given.
pub const DEFAULT_OFFER_LIMIT: usize = 60;
/// Premium offers shown per city.
pub const PREMIUM_OFFER_LIMIT: usize = 3;

/// Rental listing aggregate.
///
/// `rating` and `comments_count` are derived from the offer's comments and
/// are only ever written by the rating aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
    pub id: OfferId,
    pub title: OfferTitle,
    pub description: OfferDescription,
    pub post_date: DateTime<Utc>,
    pub city: City,
    pub preview_image: ImageRef,
    pub images: OfferImages,
    pub is_premium: bool,
    pub rating: f64,
    pub housing_type: HousingType,
    pub rooms: Rooms,
    pub max_guests: MaxGuests,
    pub price: Price,
    pub comforts: Comforts,
    pub author: UserId,
    pub comments_count: u32,
    pub location: Location,
}

impl Authored for Offer {
    fn author_id(&self) -> &UserId {
        &self.author
    }
}

/// Derived fields recomputed from an offer's comment set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OfferStats {
    pub rating: f64,
    pub comments_count: u32,
}

impl OfferStats {
    pub const EMPTY: OfferStats = OfferStats {
        rating: 0.0,
        comments_count: 0,
    };
}

/// Offer unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OfferId(pub Uuid);

impl OfferId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an offer ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, OfferIdError> {
        Uuid::parse_str(s)
            .map(OfferId)
            .map_err(|e| OfferIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for OfferId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn check_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), OfferValidationError> {
    let actual = value.chars().count();
    if actual < min || actual > max {
        return Err(OfferValidationError::Length {
            field,
            min,
            max,
            actual,
        });
    }
    Ok(())
}

fn check_range(
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<(), OfferValidationError> {
    if value < min || value > max {
        return Err(OfferValidationError::OutOfRange {
            field,
            min,
            max,
            actual: value,
        });
    }
    Ok(())
}

/// Offer title, 10 to 100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferTitle(String);

impl OfferTitle {
    pub fn new(title: String) -> Result<Self, OfferValidationError> {
        let title = title.trim().to_string();
        check_length("title", &title, 10, 100)?;
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Offer description, 20 to 1024 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferDescription(String);

impl OfferDescription {
    pub fn new(description: String) -> Result<Self, OfferValidationError> {
        let description = description.trim().to_string();
        check_length("description", &description, 20, 1024)?;
        Ok(Self(description))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Opaque path or URL of an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(image: String) -> Result<Self, OfferValidationError> {
        let image = image.trim().to_string();
        if image.is_empty() {
            return Err(OfferValidationError::EmptyImage);
        }
        Ok(Self(image))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Gallery of exactly six images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferImages(Vec<ImageRef>);

impl OfferImages {
    pub const COUNT: usize = 6;

    pub fn new(images: Vec<String>) -> Result<Self, OfferValidationError> {
        if images.len() != Self::COUNT {
            return Err(OfferValidationError::ImageCount {
                expected: Self::COUNT,
                actual: images.len(),
            });
        }

        images
            .into_iter()
            .map(ImageRef::new)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|image| image.as_str().to_string()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rooms(u8);

impl Rooms {
    pub fn new(rooms: i64) -> Result<Self, OfferValidationError> {
        check_range("rooms", rooms, 1, 8)?;
        Ok(Self(rooms as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxGuests(u8);

impl MaxGuests {
    pub fn new(guests: i64) -> Result<Self, OfferValidationError> {
        check_range("maxGuests", guests, 1, 10)?;
        Ok(Self(guests as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Nightly price in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price(u32);

impl Price {
    pub fn new(price: i64) -> Result<Self, OfferValidationError> {
        check_range("price", price, 100, 100_000)?;
        Ok(Self(price as u32))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    latitude: f64,
    longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, OfferValidationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(OfferValidationError::InvalidCoordinate {
                field: "latitude",
                value: latitude,
            });
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(OfferValidationError::InvalidCoordinate {
                field: "longitude",
                value: longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Paris,
    Cologne,
    Brussels,
    Amsterdam,
    Hamburg,
    Dusseldorf,
}

impl City {
    pub fn as_str(&self) -> &'static str {
        match self {
            City::Paris => "Paris",
            City::Cologne => "Cologne",
            City::Brussels => "Brussels",
            City::Amsterdam => "Amsterdam",
            City::Hamburg => "Hamburg",
            City::Dusseldorf => "Dusseldorf",
        }
    }
}

impl FromStr for City {
    type Err = OfferValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Paris" => Ok(City::Paris),
            "Cologne" => Ok(City::Cologne),
            "Brussels" => Ok(City::Brussels),
            "Amsterdam" => Ok(City::Amsterdam),
            "Hamburg" => Ok(City::Hamburg),
            "Dusseldorf" => Ok(City::Dusseldorf),
            other => Err(OfferValidationError::UnknownCity(other.to_string())),
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HousingType {
    Apartment,
    House,
    Room,
    Hotel,
}

impl HousingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HousingType::Apartment => "apartment",
            HousingType::House => "house",
            HousingType::Room => "room",
            HousingType::Hotel => "hotel",
        }
    }
}

impl FromStr for HousingType {
    type Err = OfferValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "apartment" => Ok(HousingType::Apartment),
            "house" => Ok(HousingType::House),
            "room" => Ok(HousingType::Room),
            "hotel" => Ok(HousingType::Hotel),
            other => Err(OfferValidationError::UnknownHousingType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comfort {
    Breakfast,
    AirConditioning,
    LaptopFriendlyWorkspace,
    BabySeat,
    Washer,
    Towels,
    Fridge,
}

impl Comfort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Comfort::Breakfast => "Breakfast",
            Comfort::AirConditioning => "Air conditioning",
            Comfort::LaptopFriendlyWorkspace => "Laptop friendly workspace",
            Comfort::BabySeat => "Baby seat",
            Comfort::Washer => "Washer",
            Comfort::Towels => "Towels",
            Comfort::Fridge => "Fridge",
        }
    }
}

impl FromStr for Comfort {
    type Err = OfferValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Breakfast" => Ok(Comfort::Breakfast),
            "Air conditioning" => Ok(Comfort::AirConditioning),
            "Laptop friendly workspace" => Ok(Comfort::LaptopFriendlyWorkspace),
            "Baby seat" => Ok(Comfort::BabySeat),
            "Washer" => Ok(Comfort::Washer),
            "Towels" => Ok(Comfort::Towels),
            "Fridge" => Ok(Comfort::Fridge),
            other => Err(OfferValidationError::UnknownComfort(other.to_string())),
        }
    }
}

/// Set of comforts, deduplicated in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Comforts(Vec<Comfort>);

impl Comforts {
    pub fn new(comforts: Vec<Comfort>) -> Self {
        let mut unique = Vec::with_capacity(comforts.len());
        for comfort in comforts {
            if !unique.contains(&comfort) {
                unique.push(comfort);
            }
        }
        Self(unique)
    }

    /// Parse comfort names.
    ///
    /// # Errors
    /// * `UnknownComfort` - A name is not one of the supported comforts
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self, OfferValidationError> {
        names
            .iter()
            .map(|name| name.as_ref().parse())
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|c| c.as_str().to_string()).collect()
    }
}

/// Command to create an offer with validated fields.
#[derive(Debug, Clone)]
pub struct CreateOfferCommand {
    pub title: OfferTitle,
    pub description: OfferDescription,
    pub city: City,
    pub preview_image: ImageRef,
    pub images: OfferImages,
    pub is_premium: bool,
    pub housing_type: HousingType,
    pub rooms: Rooms,
    pub max_guests: MaxGuests,
    pub price: Price,
    pub comforts: Comforts,
    pub location: Location,
}

/// Partial update of an offer.
///
/// Author and derived fields are deliberately absent.
#[derive(Debug, Clone, Default)]
pub struct UpdateOfferCommand {
    pub title: Option<OfferTitle>,
    pub description: Option<OfferDescription>,
    pub city: Option<City>,
    pub preview_image: Option<ImageRef>,
    pub images: Option<OfferImages>,
    pub is_premium: Option<bool>,
    pub housing_type: Option<HousingType>,
    pub rooms: Option<Rooms>,
    pub max_guests: Option<MaxGuests>,
    pub price: Option<Price>,
    pub comforts: Option<Comforts>,
    pub location: Option<Location>,
}

impl UpdateOfferCommand {
    /// Apply the provided fields to an offer.
    pub fn apply_to(self, offer: &mut Offer) {
        if let Some(title) = self.title {
            offer.title = title;
        }
        if let Some(description) = self.description {
            offer.description = description;
        }
        if let Some(city) = self.city {
            offer.city = city;
        }
        if let Some(preview_image) = self.preview_image {
            offer.preview_image = preview_image;
        }
        if let Some(images) = self.images {
            offer.images = images;
        }
        if let Some(is_premium) = self.is_premium {
            offer.is_premium = is_premium;
        }
        if let Some(housing_type) = self.housing_type {
            offer.housing_type = housing_type;
        }
        if let Some(rooms) = self.rooms {
            offer.rooms = rooms;
        }
        if let Some(max_guests) = self.max_guests {
            offer.max_guests = max_guests;
        }
        if let Some(price) = self.price {
            offer.price = price;
        }
        if let Some(comforts) = self.comforts {
            offer.comforts = comforts;
        }
        if let Some(location) = self.location {
            offer.location = location;
        }
    }
}

/// Offer as seen by a particular (possibly anonymous) viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferWithFavorite {
    pub offer: Offer,
    pub is_favorite: bool,
}

/// Single offer with its author resolved.
#[derive(Debug, Clone)]
pub struct OfferDetails {
    pub offer: Offer,
    pub author: User,
    pub is_favorite: bool,
}
