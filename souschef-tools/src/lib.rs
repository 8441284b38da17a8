mod serpapi;

pub use serpapi::SerpApiSearch;
