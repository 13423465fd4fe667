pub mod confirmation_writer;
