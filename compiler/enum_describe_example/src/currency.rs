use enum_describe_macros::GenerateEnumDescription;

/// Explicit `u8` discriminants with gaps between them.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, GenerateEnumDescription)]
pub enum CurrencyType {
    #[description("None")]
    None = 0,
    #[description("United States Dollar")]
    Usd = 1,
    #[description("Pound Sterling")]
    Gbp = 2,
    #[description("Euro")]
    Eur = 4,
}

/// Not marked, so it gets no description lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyTypeFilter {
    None = 0,
    Usd = 1,
    Gbp = 2,
    Eur = 3,
}
