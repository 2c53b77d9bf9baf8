pub mod capture_faces_use_case;
