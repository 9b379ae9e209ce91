pub mod breadcrumb;
pub mod text_area;
pub mod toast;
