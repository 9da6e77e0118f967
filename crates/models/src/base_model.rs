hbnb_core::declare_model! {
    /// Plain model with no declared fields beyond identity and timestamps.
    BaseModel {}
}
