hbnb_core::declare_model! {
    /// A state; cities reference it through `City::state_id`.
    State {
        name: String,
    }
}
