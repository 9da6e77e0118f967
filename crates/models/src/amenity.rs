hbnb_core::declare_model! {
    /// An amenity a place can offer.
    Amenity {
        name: String,
    }
}
