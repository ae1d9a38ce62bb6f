use folio_core_contact_impl::ContactFormServiceImpl;
use folio_email_impl::EmailJsServiceImpl;

pub type Email = EmailJsServiceImpl;

pub type ContactForm = ContactFormServiceImpl<Email>;
