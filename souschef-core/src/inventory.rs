/// The fixed kitchen inventory recipes are checked against. Supplied by
/// configuration of the product, not computed at runtime.
pub const AVAILABLE_COOKWARE: [&str; 8] = [
    "Spatula",
    "Frying Pan",
    "Little Pot",
    "Stovetop",
    "Whisk",
    "Knife",
    "Ladle",
    "Spoon",
];
