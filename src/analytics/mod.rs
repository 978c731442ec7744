pub mod path_statistics;
