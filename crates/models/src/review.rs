hbnb_core::declare_model! {
    /// A user's review of a place.
    Review {
        place_id: String,
        user_id: String,
        text: String,
    }
}
