pub mod delete_file_dto;
