pub mod property_reader;
pub mod report_writer;
