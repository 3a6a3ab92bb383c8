pub mod components;
mod coach;
mod library;

pub use coach::CoachView;
pub use library::LibraryView;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
