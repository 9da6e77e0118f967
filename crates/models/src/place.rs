hbnb_core::declare_model! {
    /// A rentable place.
    Place {
        city_id: String,
        user_id: String,
        name: String,
        description: String,
        number_rooms: i64,
        number_bathrooms: i64,
        max_guest: i64,
        /// Nightly price in whole currency units.
        price_by_night: i64,
        latitude: hbnb_core::Finite,
        longitude: hbnb_core::Finite,
        amenity_ids: Vec<String>,
    }
}
