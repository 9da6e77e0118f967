hbnb_core::declare_model! {
    /// A city within a state.
    City {
        state_id: String,
        name: String,
        /// Ids of places located in this city.
        places: Vec<String>,
    }
}
