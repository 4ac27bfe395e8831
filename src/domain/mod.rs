pub mod company_info;
pub mod html_tag;
pub mod review;
