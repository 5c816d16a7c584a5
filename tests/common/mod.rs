pub mod fake_page;
