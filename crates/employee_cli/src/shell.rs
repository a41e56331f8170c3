//! Interactive menu shell.
//!
//! # Responsibility
//! - Prompt for menu choices and field values, print results.
//! - Own the retry policy: re-prompt on invalid fields and unknown ids.
//!
//! # Invariants
//! - End of input stops the current prompt and the menu loop.
//! - Every store access goes through `EmployeeService`.

use employee_core::{
    validate_email, validate_phone, EmployeeRepository, EmployeeService, EmployeeServiceError,
    EmployeeUpdate, NewEmployee,
};
use std::io::{self, BufRead, Write};

const MENU: &str = "Employee Manager Menu:
1. Add an Employee
2. List All Employees
3. View an Employee
4. Edit an Employee
5. Delete an Employee
6. Exit";

const NO_EMPLOYEES: &str = "No employees found.";
const NOT_FOUND: &str = "Employee not found!";

enum Step {
    Continue,
    Quit,
}

/// Menu loop over arbitrary input/output streams.
pub struct Shell<I, O, E> {
    input: I,
    out: O,
    err: E,
}

impl<I: BufRead, O: Write, E: Write> Shell<I, O, E> {
    pub fn new(input: I, out: O, err: E) -> Self {
        Self { input, out, err }
    }

    /// Runs until the user picks Exit or input ends.
    pub fn run<R: EmployeeRepository>(&mut self, service: &mut EmployeeService<R>) -> io::Result<()> {
        loop {
            writeln!(self.out, "{MENU}")?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                return Ok(());
            };

            let step = match choice.trim().parse::<u8>() {
                Ok(1) => self.add(service)?,
                Ok(2) => self.list(service)?,
                Ok(3) => self.view(service)?,
                Ok(4) => self.edit(service)?,
                Ok(5) => self.delete(service)?,
                Ok(6) => Step::Quit,
                _ => {
                    writeln!(self.out, "\nInvalid choice!")?;
                    Step::Continue
                }
            };

            if let Step::Quit = step {
                return Ok(());
            }
        }
    }

    fn add<R: EmployeeRepository>(&mut self, service: &mut EmployeeService<R>) -> io::Result<Step> {
        writeln!(self.out, "Insert new employee")?;
        let Some(id) = self.prompt_until("Insert id (3 digits number, e.g 102): ", |value| {
            service.check_new_id(value)
        })?
        else {
            return Ok(Step::Quit);
        };
        let Some(name) =
            self.prompt_until("Insert name: ", |value| service.check_free_text("name", value))?
        else {
            return Ok(Step::Quit);
        };
        let Some(position) = self.prompt_until("Insert position: ", |value| {
            service.check_free_text("position", value)
        })?
        else {
            return Ok(Step::Quit);
        };
        let Some(email) = self.prompt_until("Insert email: ", check_email)? else {
            return Ok(Step::Quit);
        };
        let Some(phone) = self.prompt_until("Insert phone: ", check_phone)? else {
            return Ok(Step::Quit);
        };

        let request = NewEmployee {
            id,
            name,
            position,
            email,
            phone,
        };
        match service.add_employee(request) {
            Ok(_) => writeln!(self.out, "Employee inserted successfully.")?,
            Err(err) => writeln!(self.err, "Error: {err}")?,
        }
        Ok(Step::Continue)
    }

    fn list<R: EmployeeRepository>(&mut self, service: &EmployeeService<R>) -> io::Result<Step> {
        if service.is_empty() {
            writeln!(self.out, "{NO_EMPLOYEES}")?;
            return Ok(Step::Continue);
        }
        for employee in service.list_employees() {
            writeln!(self.out, "{employee}")?;
        }
        Ok(Step::Continue)
    }

    fn view<R: EmployeeRepository>(&mut self, service: &EmployeeService<R>) -> io::Result<Step> {
        if service.is_empty() {
            writeln!(self.out, "{NO_EMPLOYEES}")?;
            return Ok(Step::Continue);
        }
        let Some(id) = self.prompt_existing_id(service)? else {
            return Ok(Step::Quit);
        };
        if let Ok(employee) = service.get_employee(&id) {
            writeln!(self.out, "{employee}")?;
        }
        Ok(Step::Continue)
    }

    fn edit<R: EmployeeRepository>(&mut self, service: &mut EmployeeService<R>) -> io::Result<Step> {
        if service.is_empty() {
            writeln!(self.out, "{NO_EMPLOYEES}")?;
            return Ok(Step::Continue);
        }
        let Some(id) = self.prompt_existing_id(service)? else {
            return Ok(Step::Quit);
        };
        let Some(name) =
            self.prompt_until("Update name: ", |value| service.check_free_text("name", value))?
        else {
            return Ok(Step::Quit);
        };
        let Some(position) = self.prompt_until("Update position: ", |value| {
            service.check_free_text("position", value)
        })?
        else {
            return Ok(Step::Quit);
        };
        let Some(email) = self.prompt_until("Update email: ", check_email)? else {
            return Ok(Step::Quit);
        };
        let Some(phone) = self.prompt_until("Update phone: ", check_phone)? else {
            return Ok(Step::Quit);
        };

        let update = EmployeeUpdate {
            name,
            position,
            email,
            phone,
        };
        match service.update_employee(&id, update) {
            Ok(_) => writeln!(self.out, "Successfully updated employee.")?,
            Err(err) => writeln!(self.err, "Error: {err}")?,
        }
        Ok(Step::Continue)
    }

    fn delete<R: EmployeeRepository>(
        &mut self,
        service: &mut EmployeeService<R>,
    ) -> io::Result<Step> {
        if service.is_empty() {
            writeln!(self.out, "{NO_EMPLOYEES}")?;
            return Ok(Step::Continue);
        }
        loop {
            let Some(id) = self.prompt("Insert id: ")? else {
                return Ok(Step::Quit);
            };
            match service.delete_employee(&id) {
                Ok(_) => {
                    writeln!(self.out, "Employee deleted successfully.")?;
                    return Ok(Step::Continue);
                }
                Err(_) => writeln!(self.err, "{NOT_FOUND}")?,
            }
        }
    }

    /// Re-prompts with `NOT_FOUND` until the id names a record.
    fn prompt_existing_id<R: EmployeeRepository>(
        &mut self,
        service: &EmployeeService<R>,
    ) -> io::Result<Option<String>> {
        loop {
            let Some(id) = self.prompt("Insert Id: ")? else {
                return Ok(None);
            };
            if service.get_employee(&id).is_ok() {
                return Ok(Some(id));
            }
            writeln!(self.err, "{NOT_FOUND}")?;
        }
    }

    /// Re-prompts until `check` accepts the value. `None` on end of input.
    fn prompt_until(
        &mut self,
        text: &str,
        check: impl Fn(&str) -> Result<(), EmployeeServiceError>,
    ) -> io::Result<Option<String>> {
        loop {
            let Some(value) = self.prompt(text)? else {
                return Ok(None);
            };
            match check(&value) {
                Ok(()) => return Ok(Some(value)),
                Err(err) => writeln!(self.err, "Error: {err}")?,
            }
        }
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.out, "{text}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

fn check_email(value: &str) -> Result<(), EmployeeServiceError> {
    validate_email(value).map_err(EmployeeServiceError::from)
}

fn check_phone(value: &str) -> Result<(), EmployeeServiceError> {
    validate_phone(value).map_err(EmployeeServiceError::from)
}
