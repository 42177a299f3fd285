/// Generates consuming, chainable setters for `Option` fields.
macro_rules! setters {
    ($ty:ty { $($field:ident: $value:ty),* $(,)? }) => {
        impl $ty {
            $(
                #[must_use]
                pub fn $field(mut self, value: impl Into<$value>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )*
        }
    };
}
