pub mod stromligning;
