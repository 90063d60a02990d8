pub mod mdl;
